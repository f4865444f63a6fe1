//! JSON asset sink
//!
//! Emits generated-file notifications as NDJSON for editor integrations.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::domain::ports::AssetSink;

/// Asset sink that writes one JSON object per line
pub struct JsonAssetSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonAssetSink {
    /// Create a sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl AssetSink for JsonAssetSink {
    fn register_generated_file(&self, path: &Path) {
        self.write_event(serde_json::json!({
            "event": "generated",
            "path": path.display().to_string(),
        }));
    }

    fn refresh_view(&self) {
        self.write_event(serde_json::json!({ "event": "refresh" }));
    }
}
