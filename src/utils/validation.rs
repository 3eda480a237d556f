use crate::error::{AppError, Result};
use serde_json::Value;
use uuid::Uuid;

/// 记录ID格式验证
/// Record ids are store-generated UUID strings; anything that does not
/// parse is rejected before a single store call is made.
pub fn validate_record_id(id: &str) -> Result<()> {
    Uuid::try_parse(id).map_err(|_| AppError::InvalidId)?;
    Ok(())
}

/// Creation policy for `spoiler`/`locked`/`reply`: only the literal JSON
/// `true` switches the flag on. Strings, numbers, null and absent fields
/// all coerce to `false` without erroring.
pub fn flag_or_false(value: &Value) -> bool {
    value.as_bool().unwrap_or(false)
}

/// Edit policy for `spoiler`/`locked`: a literal JSON boolean overrides
/// the stored value, anything else keeps it. Deliberately distinct from
/// the creation policy above.
pub fn flag_or_stored(value: &Value, stored: bool) -> bool {
    value.as_bool().unwrap_or(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_record_id() {
        // 有效ID
        assert!(validate_record_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
        assert!(validate_record_id(&Uuid::new_v4().to_string()).is_ok());

        // 无效ID
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("not-a-uuid").is_err());
        assert!(validate_record_id("67e55044-10b1-426f-9247").is_err());
        assert!(validate_record_id("comment:67e55044-10b1-426f-9247-bb680e5fe0c8").is_err());
    }

    #[test]
    fn test_flag_or_false() {
        assert!(flag_or_false(&json!(true)));

        // 除字面量true外一律视为false
        assert!(!flag_or_false(&json!(false)));
        assert!(!flag_or_false(&json!(null)));
        assert!(!flag_or_false(&json!("true")));
        assert!(!flag_or_false(&json!(1)));
        assert!(!flag_or_false(&json!({"nested": true})));
    }

    #[test]
    fn test_flag_or_stored() {
        // 字面量布尔值覆盖存储值
        assert!(flag_or_stored(&json!(true), false));
        assert!(!flag_or_stored(&json!(false), true));

        // 其他情况保留存储值
        assert!(flag_or_stored(&json!(null), true));
        assert!(!flag_or_stored(&json!(null), false));
        assert!(flag_or_stored(&json!("false"), true));
        assert!(flag_or_stored(&json!(0), true));
    }
}
