//! Post-processing of generated artifacts
//!
//! Currently one policy: making generated Python modules importable from
//! inside a package by rewriting absolute imports into relative ones.

use crate::domain::entities::PostProcessor;
use crate::domain::value_objects::Language;

/// Namespace of the protobuf Python runtime
const RUNTIME_NAMESPACE: &str = "google";

/// Name of the generated file `post_processor` rewrites for `base_name`
pub fn rewritten_file(post_processor: PostProcessor, base_name: &str) -> String {
    match post_processor {
        PostProcessor::LocalizePythonImports => Language::Python
            .expected_files(base_name)
            .into_iter()
            .next()
            .unwrap_or_default(),
    }
}

/// Text transform behind `post_processor`
pub fn transform(post_processor: PostProcessor) -> fn(&str) -> String {
    match post_processor {
        PostProcessor::LocalizePythonImports => localize_python_imports,
    }
}

/// Rewrite a generated Python module so it imports package-relatively.
///
/// - `import foo_pb2` → `from . import foo_pb2`
/// - `from google.protobuf import x` → `from . google.protobuf import x`
///
/// Only lines starting with those exact forms change, so output that is
/// already relative passes through untouched.
pub fn localize_python_imports(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 64);
    for line in source.split_inclusive('\n') {
        if starts_with_keyword(line, "import") {
            out.push_str("from . ");
            out.push_str(line);
        } else if let Some(rest) = runtime_import_tail(line) {
            out.push_str("from . ");
            out.push_str(RUNTIME_NAMESPACE);
            out.push_str(rest);
        } else {
            out.push_str(line);
        }
    }
    out
}

fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .and_then(|rest| rest.chars().next())
        .map(char::is_whitespace)
        .unwrap_or(false)
}

/// For `from google<tail>` returns `<tail>` when it continues the namespace.
fn runtime_import_tail(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("from ")?.strip_prefix(RUNTIME_NAMESPACE)?;
    match rest.chars().next() {
        Some('.') => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "\
# -*- coding: utf-8 -*-
# Generated by the protocol buffer compiler.  DO NOT EDIT!
\"\"\"Generated protocol buffer code.\"\"\"
from google.protobuf import descriptor as _descriptor
from google.protobuf.internal import builder as _builder
import common_pb2 as common__pb2
_sym_db = _symbol_database.Default()
";

    #[test]
    fn rewrites_plain_import() {
        assert_eq!(localize_python_imports("import foo_pb2\n"), "from . import foo_pb2\n");
    }

    #[test]
    fn rewrites_runtime_import() {
        assert_eq!(
            localize_python_imports("from google.x import y"),
            "from . google.x import y"
        );
    }

    #[test]
    fn leaves_other_lines() {
        let input = "# import nothing\nfrom googleapis import x\nx = 1\n  import y\n";
        assert_eq!(localize_python_imports(input), input);
    }

    #[test]
    fn whole_module() {
        let out = localize_python_imports(GENERATED);
        assert!(out.contains("\nfrom . google.protobuf import descriptor as _descriptor\n"));
        assert!(out.contains("\nfrom . google.protobuf.internal import builder as _builder\n"));
        assert!(out.contains("\nfrom . import common_pb2 as common__pb2\n"));
        assert!(out.starts_with("# -*- coding: utf-8 -*-\n"));
        assert!(out.ends_with("_sym_db = _symbol_database.Default()\n"));
    }

    #[test]
    fn is_idempotent() {
        let once = localize_python_imports(GENERATED);
        let twice = localize_python_imports(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn localize_targets_python_module() {
        let policy = PostProcessor::LocalizePythonImports;
        assert_eq!(rewritten_file(policy, "msg"), "msg_pb2.py");
        assert_eq!(transform(policy)("import a_pb2\n"), "from . import a_pb2\n");
    }
}
