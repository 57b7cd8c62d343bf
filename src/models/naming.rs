//! Type-name encodings for external identifiers
//!
//! Entity type names use a dotted namespace form internally
//! (`app.billing.Order`). When a type name has to appear in an
//! external-facing identifier such as a URL path segment, it is carried in
//! a hyphenated parameter form (`app-billing-Order`). Both conversions are
//! lossless, order-preserving character substitutions.

/// Convert a dotted namespace type name to its parameter form
pub fn type_name_to_param(name: &str) -> String {
    name.replace('.', "-")
}

/// Convert a parameter-form name back to the dotted namespace form
pub fn param_to_type_name(param: &str) -> String {
    param.replace('-', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_param_form() {
        assert_eq!(type_name_to_param("app.billing.Order"), "app-billing-Order");
    }

    #[test]
    fn test_to_namespace_form() {
        assert_eq!(param_to_type_name("app-billing-Order"), "app.billing.Order");
    }

    #[test]
    fn test_round_trip_both_directions() {
        let names = ["Order", "app.Order", "app.billing.Order", ""];
        for name in names {
            assert_eq!(param_to_type_name(&type_name_to_param(name)), name);
        }
        let params = ["Order", "app-Order", "app-billing-Order"];
        for param in params {
            assert_eq!(type_name_to_param(&param_to_type_name(param)), param);
        }
    }

    #[test]
    fn test_single_segment_unchanged() {
        assert_eq!(type_name_to_param("Order"), "Order");
        assert_eq!(param_to_type_name("Order"), "Order");
    }
}
