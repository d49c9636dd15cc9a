/// Sentinel emitted when no resolution layer produced a type.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Built-in mapping from Postgres udt names to emitted base types.
pub fn base_type(udt_name: &str) -> Option<&'static str> {
    Some(match udt_name {
        "int2" | "int4" | "float4" | "float8" => "number",
        // 64-bit and arbitrary-precision values round-trip as strings
        "int8" | "numeric" | "money" => "string",
        "bool" => "boolean",
        "text" | "varchar" | "bpchar" | "char" | "citext" | "name" => "string",
        "uuid" | "inet" | "cidr" | "macaddr" | "macaddr8" => "string",
        "time" | "timetz" | "interval" => "string",
        "date" | "timestamp" | "timestamptz" => "Date",
        "bytea" => "Buffer",
        "json" | "jsonb" => "JsonValue",
        _ => return None,
    })
}
