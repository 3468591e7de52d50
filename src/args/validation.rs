use serde_json::Value;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    // split by semi-colon
    let files = file.split(';');
    for file in files {
        let path = PathBuf::from(file);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The sql startup script '{file}' is not readable."));
        }
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not valid json
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents =
        fs::read_to_string(&path).map_err(|e| format!("Could not read '{file}': {e}"))?;
    let json: Value =
        serde_json::from_str(&contents).map_err(|e| format!("'{file}' is not valid json: {e}"))?;
    validate_json_format(&json)?;
    Ok(json)
}

/// Validate the json file format
/// format we expect is this:
/// { "courses": [{"name": "value", "holes": <int>, "pars": [<int>, ...]}, ...]
/// , "players": ["PlayerName", "PlayerName2", ...]
/// }
/// Both keys are optional; anything else is rejected.
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(obj) = json.as_object() else {
        return Err("The json file is not in the correct format.".to_string());
    };

    let expected_keys = ["courses", "players"];
    for key in obj.keys() {
        if !expected_keys.contains(&key.as_str()) {
            return Err(format!(
                "The json file is not in the correct format. Expected keys: {expected_keys:?}"
            ));
        }
    }

    if let Some(courses) = obj.get("courses") {
        let Some(courses) = courses.as_array() else {
            return Err(
                "The json key courses is not in the correct format. Expected an array."
                    .to_string(),
            );
        };
        for course in courses {
            let Some(course) = course.as_object() else {
                return Err(
                    "The json key courses is not in the correct format. Expected objects."
                        .to_string(),
                );
            };
            if !course.get("name").is_some_and(Value::is_string) {
                return Err(
                    "The json key courses is not in the correct format. Each course needs a string name."
                        .to_string(),
                );
            }
            if !course.get("holes").is_some_and(Value::is_u64) {
                return Err(
                    "The json key courses is not in the correct format. Each course needs a numeric holes count."
                        .to_string(),
                );
            }
            let pars_ok = course
                .get("pars")
                .and_then(Value::as_array)
                .is_some_and(|pars| pars.iter().all(Value::is_u64));
            if !pars_ok {
                return Err(
                    "The json key courses is not in the correct format. Each course needs an array of numeric pars."
                        .to_string(),
                );
            }
        }
    }

    if let Some(players) = obj.get("players") {
        let Some(players) = players.as_array() else {
            return Err(
                "The json key players is not in the correct format. Expected an array."
                    .to_string(),
            );
        };
        for player in players {
            if !player.is_string() {
                return Err(
                    "The json key players is not in the correct format. Expected strings."
                        .to_string(),
                );
            }
        }
    }

    Ok(())
}
