//! CLI argument validation functions
//!
//! Value parsers used by clap for arguments whose rules go beyond a type
//! conversion.

use std::fs;
use std::path::PathBuf;

use validator::ValidateEmail;

use crate::models::UserRole;

/// Validate port number is within valid range (1-65535)
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Validate that a file path exists, is a file and is readable
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Validate rollback steps is between 1 and 100
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            steps_str
        )
    })?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }

    if steps > 100 {
        return Err("Rollback steps cannot exceed 100".to_string());
    }

    Ok(steps)
}

/// Validate host address format (basic validation)
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host == "localhost" || host == "0.0.0.0" || host.starts_with("127.") {
        return Ok(host.to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() == 4 {
            if parts.iter().any(|part| part.parse::<u8>().is_err()) {
                return Err(format!("Invalid IPv4 address format: '{}'", host_str));
            }
            return Ok(host.to_string());
        }
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    Ok(host.to_string())
}

/// Validate an email address with the same rule the API applies
pub fn validate_email(email_str: &str) -> Result<String, String> {
    let email = email_str.trim();
    if email.validate_email() {
        Ok(email.to_string())
    } else {
        Err(format!("Invalid email address: '{}'", email_str))
    }
}

/// Parse a role name (case-insensitive)
pub fn validate_role(role_str: &str) -> Result<UserRole, String> {
    role_str.trim().parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        for port in ["1", "80", "3000", "65535"] {
            assert!(validate_port(port).is_ok(), "Port {} should be valid", port);
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port).is_err(), "Port {} should be invalid", port);
        }
    }

    #[test]
    fn test_host_validation() {
        for host in ["localhost", "127.0.0.1", "0.0.0.0", "10.0.0.1", "blog.example.com"] {
            assert!(validate_host_address(host).is_ok(), "Host {} should be valid", host);
        }
        let too_long = "x".repeat(300);
        for host in ["", "   ", "host with spaces", "999.999.999.999", too_long.as_str()] {
            assert!(validate_host_address(host).is_err(), "Host '{}' should be invalid", host);
        }
    }

    #[test]
    fn test_rollback_steps_validation() {
        for steps in ["1", "50", "100"] {
            assert!(validate_rollback_steps(steps).is_ok());
        }
        for steps in ["0", "101", "-1", "abc", ""] {
            assert!(validate_rollback_steps(steps).is_err());
        }
    }

    #[test]
    fn test_config_file_path_validation() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_email_validation() {
        assert_eq!(validate_email(" ada@example.com ").unwrap(), "ada@example.com");
        assert!(validate_email("ada").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_role_validation() {
        assert_eq!(validate_role("Admin").unwrap(), UserRole::Admin);
        assert_eq!(validate_role("chiefeditor").unwrap(), UserRole::ChiefEditor);
        assert!(validate_role("owner").is_err());
    }
}
