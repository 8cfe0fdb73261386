//! Supported compilers and their flag spellings.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Compiler identifier that is not in the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported compiler `{name}`")]
pub struct UnsupportedCompiler {
    pub name: String,
}

/// A supported C/C++ compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compiler {
    /// Microsoft Visual C++ (`cl`)
    Msvc,
    /// GNU C++ (`g++`)
    Gxx,
    /// Clang C++ driver (`clang++`)
    Clangxx,
}

/// How the output-name flag is attached to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFlag {
    /// Flag and value form one argument: `/Fe:demo`
    Joined(&'static str),
    /// Flag and value are separate arguments: `-o demo`
    Separate(&'static str),
}

/// Flag spellings for one compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagTable {
    /// Program to invoke
    pub program: &'static str,
    /// Output executable name
    pub output: OutputFlag,
    /// Include search path prefix
    pub include: &'static str,
    /// Library search path prefix
    pub libpath: &'static str,
}

const MSVC_FLAGS: FlagTable = FlagTable {
    program: "cl",
    output: OutputFlag::Joined("/Fe:"),
    include: "/I",
    libpath: "/LIBPATH:",
};

const GXX_FLAGS: FlagTable = FlagTable {
    program: "g++",
    output: OutputFlag::Separate("-o"),
    include: "-I",
    libpath: "-L",
};

const CLANGXX_FLAGS: FlagTable = FlagTable {
    program: "clang++",
    output: OutputFlag::Separate("-o"),
    include: "-I",
    libpath: "-L",
};

impl Compiler {
    /// Every supported compiler.
    pub const ALL: [Compiler; 3] = [Compiler::Msvc, Compiler::Gxx, Compiler::Clangxx];

    /// The identifier accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Compiler::Msvc => "msvc",
            Compiler::Gxx => "g++",
            Compiler::Clangxx => "clang++",
        }
    }

    /// Flag spellings for this compiler.
    pub fn flags(&self) -> &'static FlagTable {
        match self {
            Compiler::Msvc => &MSVC_FLAGS,
            Compiler::Gxx => &GXX_FLAGS,
            Compiler::Clangxx => &CLANGXX_FLAGS,
        }
    }

    /// Program to invoke.
    pub fn program(&self) -> &'static str {
        self.flags().program
    }

    /// Arguments naming the output executable.
    pub fn output_args(&self, name: &str) -> Vec<String> {
        match self.flags().output {
            OutputFlag::Joined(flag) => vec![format!("{}{}", flag, name)],
            OutputFlag::Separate(flag) => vec![flag.to_string(), name.to_string()],
        }
    }

    /// Include search path argument.
    pub fn include_arg(&self, dir: &Path) -> String {
        format!("{}{}", self.flags().include, dir.display())
    }

    /// Library search path argument.
    pub fn libpath_arg(&self, dir: &Path) -> String {
        format!("{}{}", self.flags().libpath, dir.display())
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compiler {
    type Err = UnsupportedCompiler;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Compiler::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnsupportedCompiler {
                name: s.to_string(),
            })
    }
}
