use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use workoutrs::models::format_metric;
use workoutrs::{
    process_package, process_packages, read_package, render_to_string, OutputFormat, SensorPackage,
};

/// Integration tests that run sensor packages through dispatch and reporting

#[cfg(test)]
mod integration_tests {
    use super::*;
    use proptest::prelude::*;

    /// Count digits after the decimal point of every metric in a message line
    fn decimal_places(message: &str) -> Vec<usize> {
        message
            .split(';')
            .skip(1)
            .map(|part| {
                let number = part
                    .split_whitespace()
                    .find(|token| {
                        token.contains('.')
                            && token
                                .trim_start_matches('-')
                                .starts_with(|c: char| c.is_ascii_digit())
                    })
                    .unwrap();
                let number = number.trim_end_matches('.');
                number.split('.').nth(1).unwrap().len()
            })
            .collect()
    }

    /// The complete demo run prints one line per package in input order
    #[test]
    fn test_demo_packages_report() {
        let messages = process_packages(&SensorPackage::demo_packages()).unwrap();
        let output = render_to_string(&messages, OutputFormat::Text).unwrap();

        let expected = "\
Тип тренировки: Swimming; Длительность: 1.000 ч.; Дистанция: 0.994 км; Ср. скорость: 1.000 км/ч; Потрачено ккал: 336.000.
Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; Ср. скорость: 9.750 км/ч; Потрачено ккал: 699.750.
Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; Ср. скорость: 5.850 км/ч; Потрачено ккал: 157.500.
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_running_package() {
        let training = read_package("RUN", &[dec!(15000), dec!(1), dec!(75)]).unwrap();
        let info = training.show_training_info().unwrap();

        assert_eq!(info.distance, 9.75);
        assert_eq!(info.speed, 9.75);
        assert_eq!(info.calories, (18.0 * 9.75 - 20.0) * 75.0 / 1000.0 * 60.0);
    }

    /// Short distances land on the same side of a rounding tie as float arithmetic
    #[test]
    fn test_short_runs_round_like_float_arithmetic() {
        let packages = vec![
            SensorPackage::new("RUN", vec![dec!(30), dec!(1), dec!(75)]),
            SensorPackage::new("RUN", vec![dec!(70), dec!(1), dec!(75)]),
        ];
        let output = render_to_string(&process_packages(&packages).unwrap(), OutputFormat::Text).unwrap();

        let expected = "\
Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 0.019 км; Ср. скорость: 0.019 км/ч; Потрачено ккал: -88.421.
Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 0.045 км; Ср. скорость: 0.045 км/ч; Потрачено ккал: -86.314.
";
        assert_eq!(output, expected);

        let json = render_to_string(&process_packages(&packages).unwrap(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["distance"].as_f64(), Some(0.019));
        assert_eq!(value[1]["distance"].as_f64(), Some(0.045));
    }

    /// Pool sizes far beyond any real pool still produce a report
    #[test]
    fn test_huge_swimming_package_is_reported() {
        let package = SensorPackage::new(
            "SWM",
            vec![
                dec!(720),
                dec!(1),
                dec!(80),
                dec!(100000000000000000000),
                dec!(100000000000000000000),
            ],
        );
        let info = process_package(&package).unwrap();

        assert_eq!(decimal_places(&info.message()), vec![3, 3, 3, 3]);
        assert!(info
            .message()
            .contains("Ср. скорость: 10000000000000000719354278919532445696.000 км/ч"));
    }

    #[test]
    fn test_swimming_speed_ignores_strokes() {
        let few = read_package("SWM", &[dec!(100), dec!(1), dec!(80), dec!(25), dec!(40)]).unwrap();
        let many = read_package("SWM", &[dec!(5000), dec!(1), dec!(80), dec!(25), dec!(40)]).unwrap();

        assert_eq!(few.mean_speed().unwrap(), many.mean_speed().unwrap());
        assert_ne!(few.distance(), many.distance());
        assert_eq!(few.spent_calories().unwrap(), 336.0);
    }

    #[test]
    fn test_fractional_duration() {
        let training = read_package("WLK", &[dec!(9000), dec!(0.5), dec!(75), dec!(180)]).unwrap();
        let info = training.show_training_info().unwrap();

        assert_eq!(format_metric(info.speed), "11.700");
        assert_eq!(format_metric(info.calories), "78.750");
    }

    #[test]
    fn test_failure_aborts_batch() {
        let packages = vec![
            SensorPackage::new("RUN", vec![dec!(15000), dec!(1), dec!(75)]),
            SensorPackage::new("RUN", vec![dec!(15000), dec!(1)]),
        ];
        assert!(process_packages(&packages).is_err());
    }

    #[test]
    fn test_json_report_for_demo() {
        let messages = process_packages(&SensorPackage::demo_packages()).unwrap();
        let output = render_to_string(&messages, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["training_type"], "Running");
        assert_eq!(rows[1]["calories"].as_f64(), Some(699.75));
    }

    proptest! {
        #[test]
        fn test_report_always_three_decimals(
            action in 0u32..2_000_000u32,
            duration_centi in 1u32..10_000u32,
            weight in 30u32..200u32,
            height in 100u32..230u32,
        ) {
            let duration = Decimal::new(duration_centi as i64, 2);
            let packages = vec![
                SensorPackage::new("RUN", vec![Decimal::from(action), duration, Decimal::from(weight)]),
                SensorPackage::new(
                    "WLK",
                    vec![Decimal::from(action), duration, Decimal::from(weight), Decimal::from(height)],
                ),
                SensorPackage::new(
                    "SWM",
                    vec![Decimal::from(action), duration, Decimal::from(weight), dec!(25), dec!(40)],
                ),
            ];

            let messages = process_packages(&packages).unwrap();
            for info in &messages {
                prop_assert_eq!(decimal_places(&info.message()), vec![3, 3, 3, 3]);
            }
        }

        #[test]
        fn test_wrong_arity_always_fails(extra in 0usize..10) {
            for (code, expected) in [("SWM", 5usize), ("RUN", 3), ("WLK", 4)] {
                let count = if extra < expected { extra } else { expected + extra };
                let data = vec![dec!(1); count];
                prop_assert!(read_package(code, &data).is_err());
            }
        }
    }
}
