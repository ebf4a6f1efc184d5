use crate::server::error::AppError;

/// Parses a Discord snowflake id from a request parameter
///
/// # Arguments
/// - `field` - Name of the parameter, used in the error message
/// - `value` - Raw parameter value, `None` if it was not supplied
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed id
/// - `Err(AppError::BadRequest)` - Missing, empty, or not a non-zero integer
pub fn parse_snowflake(field: &str, value: Option<&str>) -> Result<u64, AppError> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing required parameter: {}", field)))?;

    match value.parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!(
            "Invalid {} '{}': expected a Discord id",
            field, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        assert_eq!(
            parse_snowflake("sourceGuildId", Some(" 123456789012345678 ")).unwrap(),
            123456789012345678
        );
    }

    #[test]
    fn rejects_missing_and_malformed_values() {
        assert!(matches!(
            parse_snowflake("aid", None),
            Err(AppError::BadRequest(msg)) if msg.contains("aid")
        ));
        assert!(matches!(
            parse_snowflake("aid", Some("  ")),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_snowflake("aid", Some("12a")),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_snowflake("aid", Some("0")),
            Err(AppError::BadRequest(_))
        ));
    }
}
