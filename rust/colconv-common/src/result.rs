pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::{Result, error::ErrorKind};

    fn check_scale(scale: i32, precision: i32) -> Result<()> {
        verify_arg!(scale, scale >= 0);
        verify_arg!(scale, scale <= precision);
        Ok(())
    }

    #[test]
    fn test_verify_arg() {
        assert!(check_scale(2, 5).is_ok());
        let err = check_scale(6, 5).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "scale");
                assert_eq!(message, "scale <= precision");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
