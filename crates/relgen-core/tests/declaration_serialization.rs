use relgen_core::{
    ColumnDeclaration, ColumnKind, EnumDeclaration, EnumLiteral, EnumValue, ExtractedSchema,
};

fn mood_enum() -> EnumDeclaration {
    let values = vec![
        EnumLiteral::Text("sad".to_string()),
        EnumLiteral::Text("ok".to_string()),
        EnumLiteral::Text("happy".to_string()),
    ];
    let enum_values = values
        .iter()
        .map(|value| EnumValue {
            key: value.key(),
            val: value.clone(),
        })
        .collect();
    let hashed_name = EnumDeclaration::hashed_name_for("public", "mood", &values);

    EnumDeclaration {
        schema: "public".to_string(),
        name: "mood".to_string(),
        declared_name: "mood".to_string(),
        values,
        enum_values,
        enum_suffix: "E".to_string(),
        hashed_name,
    }
}

#[test]
fn serializes_deterministically() {
    let schema = ExtractedSchema {
        schemas: vec!["public".to_string()],
        tables: Vec::new(),
        enums: vec![mood_enum()],
        views: Vec::new(),
    };

    let first = serde_json::to_string_pretty(&schema).expect("serialize");
    let second = serde_json::to_string_pretty(&schema.clone()).expect("serialize again");
    assert_eq!(first, second);
}

#[test]
fn enum_round_trips_through_json() {
    let declaration = mood_enum();
    let json = serde_json::to_string(&declaration).expect("serialize");
    let back: EnumDeclaration = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, declaration);
}

#[test]
fn column_raw_type_serializes_as_type() {
    let column = ColumnDeclaration {
        type_name: "int4".to_string(),
        kind: ColumnKind::Base,
        name: "id".to_string(),
        is_primary_key: true,
        is_identity: true,
        is_nullable: false,
        is_array: false,
        is_generated: false,
        is_regular: false,
        default_value: None,
        declared_type: "number".to_string(),
        imported_type: None,
        comments: vec!["PrimaryKey".to_string()],
        enum_ref: None,
        is_optional_on_insert: false,
        is_optional_on_update: true,
    };

    let json = serde_json::to_value(&column).expect("serialize");
    assert_eq!(json["type"], "int4");
    assert!(json.get("type_name").is_none());

    let back: ColumnDeclaration = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, column);
}

#[test]
fn text_values_serialize_as_plain_strings() {
    let declaration = mood_enum();
    let json = serde_json::to_value(&declaration).expect("serialize");
    assert_eq!(json["values"][0], "sad");
    assert_eq!(json["enum_values"][0]["key"], "sad");
}
