//! Order form rules

use super::model::Order;
use super::status::{OrderStatus, WasteType};
use crate::core::field::FieldFormat;
use crate::core::validation::{
    EntityValidationConfig, ValidatableEntity, filters, validators,
};
use serde_json::Value;

/// Required on create; checked only when present on update
fn require(config: &mut EntityValidationConfig, field: &str, message: &'static str, create: bool) {
    if create {
        config.add_required(field, message);
    } else {
        config.add_validator(field, validators::required(message));
    }
}

impl ValidatableEntity for Order {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        let create = operation == "create";
        let mut config = EntityValidationConfig::new("order");

        config.add_filter("wasteType", filters::trim());
        require(&mut config, "wasteType", "Waste Type is required", create);
        config.add_validator(
            "wasteType",
            validators::in_list(WasteType::wire_values(), "Waste Type is invalid"),
        );

        config.add_filter("quantity", filters::parse_number());
        require(&mut config, "quantity", "Quantity is required", create);
        config
            .add_validator(
                "quantity",
                validators::number("Quantity must be a positive number"),
            )
            .add_validator(
                "quantity",
                validators::positive("Quantity must be a positive number"),
            )
            .add_validator(
                "quantity",
                validators::whole_number("Quantity must be a whole number"),
            );

        config
            .add_filter("amount", filters::parse_number())
            .add_filter("amount", filters::round_decimals(2));
        require(&mut config, "amount", "Amount is required", create);
        config
            .add_validator("amount", validators::number("Amount must be a positive number"))
            .add_validator(
                "amount",
                validators::positive("Amount must be a positive number"),
            );

        config.add_filter("address", filters::trim());
        require(&mut config, "address", "Address is required", create);

        config
            .add_filter("phoneNumber", filters::trim())
            .add_filter("phoneNumber", filters::number_as_text());
        require(&mut config, "phoneNumber", "Phone Number is required", create);
        config.add_validator(
            "phoneNumber",
            validators::format(FieldFormat::Phone, "Phone Number must be 10 digits"),
        );

        config.add_filter("email", filters::trim());
        require(&mut config, "email", "Email is required", create);
        config.add_validator(
            "email",
            validators::format(FieldFormat::Email, "Email is invalid"),
        );

        config
            .add_filter("status", filters::trim())
            .add_filter("status", filters::canonical(OrderStatus::canonical_label))
            .add_validator(
                "status",
                validators::in_list(OrderStatus::known_labels(), "Status is invalid"),
            );

        config
    }
}

impl Order {
    /// Completion of the new-order form, 0 to 100
    pub fn form_progress(form: &Value) -> u8 {
        Self::validation_config("create").progress(form)
    }
}
