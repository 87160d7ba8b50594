//! Employee form rules

use super::model::Employee;
use crate::core::field::FieldFormat;
use crate::core::validation::{
    EntityValidationConfig, ValidatableEntity, filters, validators,
};
use serde_json::Value;

impl ValidatableEntity for Employee {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        let create = operation == "create";
        let mut config = EntityValidationConfig::new("employee");

        let text_fields = [
            ("EmployeeName", "Employee name is required"),
            ("EmployeeId", "Employee ID is required"),
            ("DepartmentName", "Department is required"),
            ("JobRole", "Job role is required"),
        ];
        for (field, message) in text_fields {
            config.add_filter(field, filters::trim());
            if create {
                config.add_required(field, message);
            } else {
                config.add_validator(field, validators::required(message));
            }
        }

        config
            .add_filter("PhoneNumber", filters::trim())
            .add_filter("PhoneNumber", filters::number_as_text());
        if create {
            config.add_required("PhoneNumber", "Phone number is required");
        } else {
            config.add_validator("PhoneNumber", validators::required("Phone number is required"));
        }
        config.add_validator(
            "PhoneNumber",
            validators::format(FieldFormat::Phone, "Phone number must be exactly 10 digits"),
        );

        config.add_filter("Email", filters::trim());
        if create {
            config.add_required("Email", "Email is required");
        } else {
            config.add_validator("Email", validators::required("Email is required"));
        }
        config
            .add_validator(
                "Email",
                validators::contains_char('@', "Email must contain @ symbol"),
            )
            .add_validator(
                "Email",
                validators::format(FieldFormat::Email, "Email must include a domain"),
            );

        config
            .add_filter("BasicSalary", filters::parse_number())
            .add_filter("BasicSalary", filters::round_decimals(2));
        if create {
            config.add_required("BasicSalary", "Basic salary must be greater than 0");
        }
        config
            .add_validator(
                "BasicSalary",
                validators::number("Basic salary must be greater than 0"),
            )
            .add_validator(
                "BasicSalary",
                validators::positive("Basic salary must be greater than 0"),
            );

        for (field, message) in [
            ("Bonus", "Bonus cannot be negative"),
            ("OverTimeHours", "Overtime hours cannot be negative"),
        ] {
            config
                .add_filter(field, filters::parse_number())
                .add_validator(field, validators::number(message))
                .add_validator(field, validators::non_negative(message));
        }

        config
    }
}

impl Employee {
    /// Completion of the add-employee form, 0 to 100
    pub fn form_progress(form: &Value) -> u8 {
        Self::validation_config("create").progress(form)
    }
}
