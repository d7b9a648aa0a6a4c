use super::models::ModuleType;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
enum Property {
    Number,
    Integer,
    Boolean,
    /// An array whose items must be one of the listed strings
    OneOfEach(&'static [&'static str]),
}

struct ModuleSchema {
    required: &'static [&'static str],
    properties: &'static [(&'static str, Property)],
}

const COMPATIBLE_WITH: &[&str] = &["OT2", "Human"];

const PIPETTE: ModuleSchema = ModuleSchema {
    required: &["upper_range_ul", "lower_range_ul", "channels", "compatible_with"],
    properties: &[
        ("upper_range_ul", Property::Number),
        ("lower_range_ul", Property::Number),
        ("channels", Property::Integer),
        ("compatible_with", Property::OneOfEach(COMPATIBLE_WITH)),
    ],
};

const INCUBATOR: ModuleSchema = ModuleSchema {
    required: &["temperature", "shaking", "fits"],
    properties: &[
        ("temperature", Property::Number),
        ("shaking", Property::Boolean),
        ("fits", Property::OneOfEach(&["deep96", "deep384", "agar96"])),
    ],
};

const MAGDECK: ModuleSchema = ModuleSchema {
    required: &["fits", "compatible_with"],
    properties: &[
        ("fits", Property::OneOfEach(&["pcrhardshell96", "pcrstrip8"])),
        ("compatible_with", Property::OneOfEach(COMPATIBLE_WITH)),
    ],
};

const TEMPDECK: ModuleSchema = ModuleSchema {
    required: &[
        "upper_range_tm",
        "lower_range_tm",
        "default_tm",
        "compatible_with",
        "fits",
    ],
    properties: &[
        ("upper_range_tm", Property::Number),
        ("lower_range_tm", Property::Number),
        ("default_tm", Property::Number),
        ("channels", Property::Integer),
        (
            "fits",
            Property::OneOfEach(&["pcrhardshell96", "pcrstrip8", "microcentrifuge2ml"]),
        ),
        ("compatible_with", Property::OneOfEach(COMPATIBLE_WITH)),
    ],
};

fn schema_for(module_type: &ModuleType) -> &'static ModuleSchema {
    match module_type {
        ModuleType::Pipette => &PIPETTE,
        ModuleType::Incubator => &INCUBATOR,
        ModuleType::Magdeck => &MAGDECK,
        ModuleType::Tempdeck => &TEMPDECK,
    }
}

fn check_property(key: &str, property: Property, value: &Value) -> Result<(), String> {
    let ok = match property {
        Property::Number => value.is_number(),
        Property::Integer => value.is_i64() || value.is_u64(),
        Property::Boolean => value.is_boolean(),
        Property::OneOfEach(allowed) => {
            let Some(items) = value.as_array() else {
                return Err(format!("'{key}' must be an array"));
            };
            if let Some(bad) = items
                .iter()
                .find(|item| !item.as_str().is_some_and(|s| allowed.contains(&s)))
            {
                return Err(format!(
                    "'{key}' contains {bad}, expected one of {}",
                    allowed.join(", ")
                ));
            }
            true
        }
    };

    if ok {
        Ok(())
    } else {
        let expected = match property {
            Property::Number => "a number",
            Property::Integer => "an integer",
            Property::Boolean => "a boolean",
            Property::OneOfEach(_) => "an array",
        };
        Err(format!("'{key}' must be {expected}"))
    }
}

/// Checks module data against the schema of its type: the value must be an
/// object, carry every required key, and every known key must have the
/// expected type. Unknown keys are allowed.
pub fn validate_module_data(module_type: &ModuleType, data: &Value) -> Result<(), String> {
    let schema = schema_for(module_type);
    let Some(object) = data.as_object() else {
        return Err("data must be a JSON object".to_string());
    };

    if let Some(missing) = schema.required.iter().find(|key| !object.contains_key(**key)) {
        return Err(format!("'{missing}' is required"));
    }

    for (key, property) in schema.properties {
        if let Some(value) = object.get(*key) {
            check_property(key, *property, value)?;
        }
    }

    Ok(())
}
