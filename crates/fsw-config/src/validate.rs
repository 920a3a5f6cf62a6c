//! Sweep configuration validation logic.

use crate::schema::SweepConfig;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Empty parameter list: at least one Reynolds number is required")]
    EmptyParameterList,
}

pub fn validate_config(config: &SweepConfig) -> Result<(), ValidationError> {
    if config.reynolds_numbers.is_empty() {
        return Err(ValidationError::EmptyParameterList);
    }

    for &re in &config.reynolds_numbers {
        if !re.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "reynolds_numbers".to_string(),
                value: re.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    if config.max_iterations == 0 {
        return Err(ValidationError::InvalidValue {
            field: "max_iterations".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if config.parallel_jobs == 0 {
        return Err(ValidationError::InvalidValue {
            field: "parallel_jobs".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if !(config.validation.tolerance.is_finite() && config.validation.tolerance > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "validation.tolerance".to_string(),
            value: config.validation.tolerance.to_string(),
            reason: "must be a positive finite number".to_string(),
        });
    }

    if !(config.physics.reference_velocity.is_finite() && config.physics.reference_velocity > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "physics.reference_velocity".to_string(),
            value: config.physics.reference_velocity.to_string(),
            reason: "must be a positive finite number".to_string(),
        });
    }

    if !(config.physics.reference_length.is_finite() && config.physics.reference_length > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "physics.reference_length".to_string(),
            value: config.physics.reference_length.to_string(),
            reason: "must be a positive finite number".to_string(),
        });
    }

    if config.tools.solve_timeout_secs == 0 {
        return Err(ValidationError::InvalidValue {
            field: "tools.solve_timeout_secs".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}
