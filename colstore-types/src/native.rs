use std::fmt;

/// Physical value type backing a column store.
///
/// The first three are stored in the dense-bitmap family, the `Sql*` types in
/// the nullable-sentinel family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Boolean,
    Int32,
    Int64,
    SqlInt64,
    SqlDecimal,
}

impl NativeType {
    pub const ALL: [NativeType; 5] = [
        NativeType::Boolean,
        NativeType::Int32,
        NativeType::Int64,
        NativeType::SqlInt64,
        NativeType::SqlDecimal,
    ];

    /// Stable display name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            NativeType::Boolean => "Boolean",
            NativeType::Int32 => "Int32",
            NativeType::Int64 => "Int64",
            NativeType::SqlInt64 => "SqlInt64",
            NativeType::SqlDecimal => "SqlDecimal",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
