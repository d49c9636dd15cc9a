use relgen_core::{EnumDeclaration, EnumLiteral, EnumValue, FilterContext, ResolvedConfig};
use relgen_introspect::RawEnum;

/// Normalize one schema's raw enums into declarations.
///
/// Runs for every schema before any table or view is assembled, because
/// column type resolution needs the complete enum list.
pub fn normalize_enums(
    config: &ResolvedConfig,
    schema: &str,
    raw: &[RawEnum],
) -> Vec<EnumDeclaration> {
    raw.iter()
        .filter_map(|entry| {
            if !(config.enum_filter)(&entry.name, &FilterContext { schema }) {
                return None;
            }

            let declared_name = config.nominate_enum(&entry.name, schema);

            let values: Vec<EnumLiteral> = entry
                .values
                .iter()
                .map(|label| EnumLiteral::classify(label))
                .collect();

            let enum_values = values
                .iter()
                .map(|value| EnumValue {
                    key: value.key(),
                    val: value.clone(),
                })
                .collect();

            let hashed_name =
                EnumDeclaration::hashed_name_for(schema, &declared_name, &values);

            Some(EnumDeclaration {
                schema: schema.to_string(),
                name: entry.name.clone(),
                declared_name,
                values,
                enum_values,
                enum_suffix: config.enum_suffix.clone(),
                hashed_name,
            })
        })
        .collect()
}
