//! Language value object - the closed set of code generation backends

use serde::{Deserialize, Serialize};

/// Output language for a `protoc` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C# (`--csharp_out`)
    #[serde(alias = "c#")]
    CSharp,
    /// Go (`--go_out`, needs protoc-gen-go on PATH)
    #[serde(alias = "golang")]
    Go,
    /// Python (`--python_out`)
    Python,
    /// C++ (`--cpp_out`)
    #[serde(alias = "c++")]
    Cpp,
}

impl Language {
    /// All languages in invocation order
    pub const ALL: [Language; 4] = [
        Language::CSharp,
        Language::Go,
        Language::Python,
        Language::Cpp,
    ];

    /// Key of this language's table in a config file
    pub fn config_key(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Python => "python",
            Language::Cpp => "cpp",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Python => "Python",
            Language::Cpp => "C++",
        }
    }

    /// The compiler flag selecting this backend's output directory
    pub fn output_flag(&self) -> &'static str {
        match self {
            Language::CSharp => "--csharp_out",
            Language::Go => "--go_out",
            Language::Python => "--python_out",
            Language::Cpp => "--cpp_out",
        }
    }

    /// Argument template; `{0}` is replaced by the output directory.
    pub fn flag_template(&self) -> String {
        format!("{}=\"{{0}}\"", self.output_flag())
    }

    /// Extensions of the files this backend generates
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::CSharp => &[".cs"],
            Language::Go => &[".pb.go"],
            Language::Python => &["_pb2.py"],
            Language::Cpp => &[".pb.h", ".pb.cc"],
        }
    }

    /// Whether output lands under the schema's include-relative directory
    /// rather than flat in the output directory
    pub fn mirrors_virtual_path(&self) -> bool {
        matches!(self, Language::Python | Language::Cpp)
    }

    /// File names generated for a schema with the given base name.
    ///
    /// C# output is named after the PascalCase form of the base name,
    /// every other backend appends its suffix to the base name unchanged.
    pub fn expected_files(&self, base_name: &str) -> Vec<String> {
        let stem = match self {
            Language::CSharp => pascal_case(base_name),
            _ => base_name.to_string(),
        };
        self.extensions()
            .iter()
            .map(|ext| format!("{}{}", stem, ext))
            .collect()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Convert `foo_bar.baz2x` to `FooBarBaz2X` the way the C# generator does.
fn pascal_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cap_next = true;
    for c in input.chars() {
        if c.is_ascii_lowercase() {
            out.push(if cap_next { c.to_ascii_uppercase() } else { c });
            cap_next = false;
        } else if c.is_ascii_uppercase() {
            out.push(c);
            cap_next = false;
        } else if c.is_ascii_digit() {
            out.push(c);
            cap_next = true;
        } else {
            cap_next = true;
        }
    }
    out
}
