//! Tests for budget domain models and the `Period` type.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::budgets::{Budget, BudgetSummary, BudgetUpdate, NewBudget, Period};
    use crate::errors::{Error, ValidationError};

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_period_parse_valid() {
        let parsed: Period = "2024-03".parse().unwrap();
        assert_eq!(parsed, period(2024, 3));
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 3);
    }

    #[test]
    fn test_period_parse_rejects_malformed() {
        let cases = [
            "",
            "2024",
            "2024-",
            "-03",
            "2024-3",
            "2024-003",
            "24-03",
            "2024/03",
            "202403",
            "2024-13",
            "2024-00",
            "2024-03-01",
            " 2024-03",
            "2024-03 ",
            "abcd-ef",
        ];
        for case in cases {
            let result: Result<Period, _> = case.parse();
            assert!(
                matches!(
                    result,
                    Err(Error::Validation(ValidationError::InvalidPeriod(_)))
                ),
                "expected '{}' to be rejected",
                case
            );
        }
    }

    #[test]
    fn test_period_new_rejects_out_of_range() {
        assert!(Period::new(999, 6).is_err());
        assert!(Period::new(10000, 6).is_err());
        assert!(Period::new(2024, 0).is_err());
        assert!(Period::new(2024, 13).is_err());
        assert!(Period::new(Period::MIN_YEAR, 1).is_ok());
        assert!(Period::new(Period::MAX_YEAR, 12).is_ok());
    }

    #[test]
    fn test_period_display_zero_pads() {
        assert_eq!(period(2024, 3).to_string(), "2024-03");
        assert_eq!(period(2024, 12).to_string(), "2024-12");
        assert_eq!(period(1000, 1).to_string(), "1000-01");
    }

    #[test]
    fn test_period_date_range_is_half_open() {
        assert_eq!(
            period(2024, 3).date_range(),
            (date(2024, 3, 1), date(2024, 4, 1))
        );
        // December rolls over into the next year.
        assert_eq!(
            period(2024, 12).date_range(),
            (date(2024, 12, 1), date(2025, 1, 1))
        );
        // Leap-year February still ends on the first of March.
        assert_eq!(
            period(2024, 2).date_range(),
            (date(2024, 2, 1), date(2024, 3, 1))
        );
    }

    #[test]
    fn test_period_containing() {
        assert_eq!(Period::containing(date(2024, 3, 1)), period(2024, 3));
        assert_eq!(Period::containing(date(2024, 3, 31)), period(2024, 3));
        assert_eq!(Period::containing(date(2025, 1, 15)), period(2025, 1));
    }

    #[test]
    fn test_period_months_back() {
        assert_eq!(period(2024, 3).months_back(0), period(2024, 3));
        assert_eq!(period(2024, 3).months_back(1), period(2024, 2));
        assert_eq!(period(2024, 3).months_back(3), period(2023, 12));
        assert_eq!(period(2024, 3).months_back(14), period(2023, 1));
        assert_eq!(period(2024, 1).months_back(12), period(2023, 1));
    }

    #[test]
    fn test_period_ordering_is_chronological() {
        assert!(period(2023, 12) < period(2024, 1));
        assert!(period(2024, 1) < period(2024, 2));
        assert!(period(2024, 2) < period(2025, 1));
    }

    #[test]
    fn test_period_serde_uses_canonical_string() {
        let serialized = serde_json::to_string(&period(2024, 3)).unwrap();
        assert_eq!(serialized, "\"2024-03\"");

        let deserialized: Period = serde_json::from_str("\"2024-03\"").unwrap();
        assert_eq!(deserialized, period(2024, 3));

        assert!(serde_json::from_str::<Period>("\"2024-3\"").is_err());
        assert!(serde_json::from_str::<Period>("\"2024-13\"").is_err());
    }

    #[test]
    fn test_new_budget_validation() {
        let budget = valid_new_budget();
        assert!(budget.validate().is_ok());

        let mut no_category = valid_new_budget();
        no_category.category_id = "  ".to_string();
        assert!(matches!(
            no_category.validate(),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));

        let mut zero_planned = valid_new_budget();
        zero_planned.planned = dec!(0);
        assert!(matches!(
            zero_planned.validate(),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));

        let mut negative_planned = valid_new_budget();
        negative_planned.planned = dec!(-300);
        assert!(negative_planned.validate().is_err());
    }

    #[test]
    fn test_budget_update_requires_id() {
        let update = BudgetUpdate {
            id: None,
            category_id: "cat_groceries".to_string(),
            period: period(2024, 3),
            planned: dec!(300),
            notes: None,
        };
        assert!(matches!(
            update.validate(),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_new_budget_deserializes_camel_case() {
        let budget: NewBudget = serde_json::from_value(json!({
            "categoryId": "cat_groceries",
            "period": "2024-03",
            "planned": 300.0
        }))
        .unwrap();

        assert_eq!(budget.category_id, "cat_groceries");
        assert_eq!(budget.period, period(2024, 3));
        assert_eq!(budget.planned, dec!(300));
        assert!(budget.id.is_none());
        assert!(budget.notes.is_none());
    }

    #[test]
    fn test_budget_summary_wire_shape() {
        let summary = BudgetSummary {
            category_id: "cat_groceries".to_string(),
            category: "Groceries".to_string(),
            period: period(2024, 3),
            planned: dec!(300),
            actual: dec!(-165.50),
            variance: dec!(-465.50),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["categoryId"], "cat_groceries");
        assert_eq!(value["category"], "Groceries");
        assert_eq!(value["period"], "2024-03");
        assert_eq!(value["planned"], json!(300.0));
        assert_eq!(value["actual"], json!(-165.5));
        assert_eq!(value["variance"], json!(-465.5));
    }

    #[test]
    fn test_budget_wire_shape_round_trips() {
        let budget = Budget {
            id: "bgt_0a1b2c3d4e5f".to_string(),
            category_id: "cat_groceries".to_string(),
            period: period(2024, 3),
            planned: dec!(300),
            notes: Some("March food plan".to_string()),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };

        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["categoryId"], "cat_groceries");
        assert_eq!(value["period"], "2024-03");

        let back: Budget = serde_json::from_value(value).unwrap();
        assert_eq!(back, budget);
    }

    fn valid_new_budget() -> NewBudget {
        NewBudget {
            id: None,
            category_id: "cat_groceries".to_string(),
            period: period(2024, 3),
            planned: dec!(300),
            notes: None,
        }
    }
}
