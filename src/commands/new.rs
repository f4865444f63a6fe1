use std::path::Path;

use anyhow::Result;

use protosync::application::create_schema_file;

use super::CommandContext;

pub fn cmd_new(ctx: &CommandContext, dir: &Path, name: Option<&str>) -> Result<bool> {
    let dir = ctx.cwd.join(dir);
    let path = create_schema_file(&dir, name)?;

    if ctx.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "event": "created",
                "command": "new",
                "path": path.display().to_string(),
            })
        );
    } else {
        println!("Created {}", path.display());
    }
    Ok(true)
}
