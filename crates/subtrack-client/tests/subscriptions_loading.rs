mod support;

use subtrack_client::commands::common::SourceOptions;
use subtrack_client::commands::{cycles, summary};
use subtrack_client::commands::validate::{self, ValidateRunOptions};
use subtrack_client::contracts::envelope::failure_from_error;
use support::spending_testkit::{
    AS_OF, approx_eq, household_rows, payload, temp_home_in_tmp, write_raw, write_subscriptions,
};

#[test]
fn missing_default_file_reports_path_and_recovery() {
    let temp = temp_home_in_tmp("subtrack-missing");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = summary::run_with_options(SourceOptions {
            home_override: Some(&home),
            ..SourceOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "subscriptions_not_found");
            assert!(error.message.contains("subscriptions.json"));
            assert!(error.recovery_steps.len() >= 2);
        }
    }
}

#[test]
fn explicit_csv_file_is_loaded() {
    let temp = temp_home_in_tmp("subtrack-csv");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let path = write_raw(
            &home,
            "subs.csv",
            "name,cost,billing_cycle,next_renewal,category,status\n\
             Netflix,15.99,monthly,2024-02-01,Entertainment,active\n\
             Gym,120,quarterly,2024-03-01,Health,\n\
             Old,50,monthly,2024-01-18,,paused\n",
        );
        let value = payload(summary::run_with_options(SourceOptions {
            file: Some(path.display().to_string()),
            as_of: Some(AS_OF.to_string()),
            home_override: Some(&home),
            ..SourceOptions::default()
        }));
        assert_eq!(value["data"]["active_subscriptions"], 2);
        assert!(approx_eq(&value["data"]["total_monthly"], 55.99));
        assert_eq!(
            value["data"]["source"]["path"].as_str().map(|p| p.ends_with("subs.csv")),
            Some(true)
        );
    }
}

#[test]
fn capitalized_cycle_keeps_its_raw_key_and_warns() {
    let temp = temp_home_in_tmp("subtrack-raw-cycle");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let path = write_raw(
            &home,
            "subs.csv",
            "name,cost,billing_cycle,next_renewal\nIDE,120,Yearly,2024-03-01\n",
        );
        let value = payload(cycles::run_with_options(SourceOptions {
            file: Some(path.display().to_string()),
            as_of: Some(AS_OF.to_string()),
            home_override: Some(&home),
            ..SourceOptions::default()
        }));
        let rows = &value["data"]["rows"];
        assert_eq!(rows.as_array().map(Vec::len), Some(1));
        assert_eq!(rows[0]["billing_cycle"], "Yearly");
        assert_eq!(rows[0]["recognized"], false);
        assert!(approx_eq(&value["data"]["total_monthly"], 120.0));

        let warnings = &value["data"]["warnings"];
        assert_eq!(warnings.as_array().map(Vec::len), Some(1));
        assert_eq!(warnings[0]["code"], "unrecognized_billing_cycle");
        assert_eq!(warnings[0]["row"], 1);
    }
}

#[test]
fn stdin_source_is_read_for_dash_path() {
    let result = summary::run_with_options(SourceOptions {
        file: Some("-".to_string()),
        as_of: Some(AS_OF.to_string()),
        stdin_override: Some(
            r#"[{"name":"Music","cost":10,"billing_cycle":"monthly","next_renewal":"2024-02-01"}]"#
                .to_string(),
        ),
        ..SourceOptions::default()
    });
    let value = payload(result);
    assert_eq!(value["data"]["source"]["kind"], "stdin");
    assert!(approx_eq(&value["data"]["total_monthly"], 10.0));
}

#[test]
fn validate_reports_counts_for_a_clean_file() {
    let temp = temp_home_in_tmp("subtrack-validate");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(validate::run_with_options(ValidateRunOptions {
            home_override: Some(&home),
            ..ValidateRunOptions::default()
        }));
        let summary = &value["data"]["summary"];
        assert_eq!(summary["rows_read"], 6);
        assert_eq!(summary["rows_valid"], 6);
        assert_eq!(summary["active"], 5);
        assert_eq!(summary["inactive"], 1);
    }
}

#[test]
fn validate_lists_every_bad_row() {
    let temp = temp_home_in_tmp("subtrack-validate-bad");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let path = write_raw(
            &home,
            "bad.csv",
            "name,cost,billing_cycle,next_renewal\n\
             ,5,monthly,2024-01-01\n\
             Music,-3,monthly,2024-01-01\n\
             News,4,weekly,01/02/2024\n\
             Fine,1,monthly,2024-01-01\n",
        );
        let result = validate::run_with_options(ValidateRunOptions {
            path: Some(path.display().to_string()),
            ..ValidateRunOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "subscriptions_validation_failed");
            let envelope = failure_from_error(&error);
            assert!(!envelope.ok);
            assert!(envelope.data.is_some());
            if let Some(data) = envelope.data {
                assert_eq!(data["summary"]["rows_read"], 4);
                assert_eq!(data["summary"]["rows_invalid"], 3);
                assert_eq!(data["issues"].as_array().map(Vec::len), Some(3));
                assert_eq!(data["issues"][1]["field"], "cost");
                assert_eq!(data["issues"][2]["field"], "next_renewal");
                assert_eq!(data["help_command"], "subtrack validate --help");
            }
        }
    }
}

#[test]
fn unsupported_formats_are_rejected() {
    let temp = temp_home_in_tmp("subtrack-format");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let path = write_raw(&home, "subs.txt", "just some notes about my subscriptions");
        let result = validate::run_with_options(ValidateRunOptions {
            path: Some(path.display().to_string()),
            ..ValidateRunOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert_eq!(
                error.data.as_ref().map(|data| data["received_format"].clone()),
                Some(serde_json::json!("unknown"))
            );
        }
    }
}
