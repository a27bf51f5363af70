mod support;

use serde_json::Value;
use subtrack_client::commands::common::SourceOptions;
use subtrack_client::commands::forecast::{self, ForecastRunOptions};
use subtrack_client::commands::list::{self, ListRunOptions};
use subtrack_client::commands::upcoming::{self, UpcomingRunOptions};
use subtrack_client::commands::{categories, cycles, dash, summary};
use support::spending_testkit::{
    AS_OF, approx_eq, household_monthly_total, household_rows, names, payload, subscription,
    temp_home_in_tmp, write_subscriptions,
};

fn source<'a>(home: &'a std::path::Path) -> SourceOptions<'a> {
    SourceOptions {
        as_of: Some(AS_OF.to_string()),
        home_override: Some(home),
        ..SourceOptions::default()
    }
}

#[test]
fn summary_counts_only_active_subscriptions() {
    let temp = temp_home_in_tmp("subtrack-summary");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(summary::run_with_options(source(&home)));
        let data = &value["data"];

        assert_eq!(value["command"], "summary");
        assert_eq!(data["as_of"], AS_OF);
        assert_eq!(data["active_subscriptions"], 5);
        assert!(approx_eq(&data["total_monthly"], household_monthly_total()));
        assert!(approx_eq(&data["total_yearly"], household_monthly_total() * 12.0));
        assert!(approx_eq(&data["average_monthly"], household_monthly_total() / 5.0));
        assert_eq!(data["currencies"], serde_json::json!(["USD"]));
        assert_eq!(data["source"]["kind"], "file");
    }
}

#[test]
fn summary_of_empty_list_is_all_zero() {
    let temp = temp_home_in_tmp("subtrack-summary-empty");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &[]);
        let value = payload(summary::run_with_options(source(&home)));
        let data = &value["data"];
        assert_eq!(data["active_subscriptions"], 0);
        assert!(approx_eq(&data["total_monthly"], 0.0));
        assert!(approx_eq(&data["total_yearly"], 0.0));
        assert!(approx_eq(&data["average_monthly"], 0.0));
    }
}

#[test]
fn categories_follow_first_occurrence_with_other_bucket() {
    let temp = temp_home_in_tmp("subtrack-categories");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(categories::run_with_options(source(&home)));
        let rows = value["data"]["rows"].as_array().cloned().unwrap_or_default();

        let labels = rows
            .iter()
            .filter_map(|row| row["category"].as_str())
            .collect::<Vec<&str>>();
        assert_eq!(labels, vec!["Entertainment", "Health", "Other"]);
        assert!(approx_eq(&rows[0]["monthly_total"], 15.99 + 9.99));
        assert_eq!(rows[0]["count"], 2);
        assert!(approx_eq(&rows[1]["monthly_total"], 40.0));
        assert_eq!(rows[2]["count"], 2);

        let share_total = rows
            .iter()
            .filter_map(|row| row["share"].as_f64())
            .sum::<f64>();
        assert!((share_total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn cycles_keep_unrecognized_keys_and_warn() {
    let temp = temp_home_in_tmp("subtrack-cycles");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(
            &home,
            &[
                subscription("Box", 12.0, "fortnightly", "2024-02-01", None),
                subscription("Music", 10.0, "monthly", "2024-02-01", None),
                subscription("Paper", 3.0, "weekly", "2024-02-01", None),
            ],
        );
        let value = payload(cycles::run_with_options(source(&home)));
        let data = &value["data"];
        let rows = data["rows"].as_array().cloned().unwrap_or_default();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["billing_cycle"], "fortnightly");
        assert_eq!(rows[0]["recognized"], false);
        assert!(approx_eq(&rows[0]["monthly_total"], 12.0));
        assert!(approx_eq(&rows[2]["monthly_total"], 13.0));
        assert!(approx_eq(&data["total_monthly"], 35.0));
        assert_eq!(data["warnings"][0]["code"], "unrecognized_billing_cycle");
        assert_eq!(data["warnings"][0]["row"], 1);
    }
}

#[test]
fn upcoming_lists_window_soonest_first() {
    let temp = temp_home_in_tmp("subtrack-upcoming");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(upcoming::run_with_options(UpcomingRunOptions {
            as_of: Some(AS_OF.to_string()),
            home_override: Some(&home),
            ..UpcomingRunOptions::default()
        }));
        let data = &value["data"];

        assert_eq!(data["within_days"], 30);
        assert_eq!(
            names(&data["rows"]),
            vec!["Coffee Club", "Spotify", "Netflix"]
        );
        assert_eq!(data["rows"][0]["status_label"], "Tomorrow");
        assert_eq!(data["rows"][0]["category"], "Other");
        assert_eq!(data["rows"][1]["days_until"], 5);
        assert_eq!(data["rows"][2]["status_label"], "In 17 days");
        assert!(approx_eq(&data["total_due"], 5.0 + 9.99 + 15.99));
    }
}

#[test]
fn upcoming_window_is_configurable_and_bounded() {
    let temp = temp_home_in_tmp("subtrack-upcoming-days");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let narrow = payload(upcoming::run_with_options(UpcomingRunOptions {
            as_of: Some(AS_OF.to_string()),
            days: Some(1),
            home_override: Some(&home),
            ..UpcomingRunOptions::default()
        }));
        assert_eq!(names(&narrow["data"]["rows"]), vec!["Coffee Club"]);

        let wide = payload(upcoming::run_with_options(UpcomingRunOptions {
            as_of: Some(AS_OF.to_string()),
            days: Some(365),
            home_override: Some(&home),
            ..UpcomingRunOptions::default()
        }));
        assert_eq!(wide["data"]["rows"].as_array().map(Vec::len), Some(5));

        let negative = upcoming::run_with_options(UpcomingRunOptions {
            as_of: Some(AS_OF.to_string()),
            days: Some(-1),
            home_override: Some(&home),
            ..UpcomingRunOptions::default()
        });
        assert!(negative.is_err());
        if let Err(error) = negative {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("--days"));
        }
    }
}

#[test]
fn upcoming_reports_overdue_renewals_as_outside_the_window() {
    let temp = temp_home_in_tmp("subtrack-upcoming-overdue");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(
            &home,
            &[
                subscription("Lapsed", 4.0, "monthly", "2024-01-10", None),
                subscription("Today", 6.0, "monthly", AS_OF, None),
            ],
        );
        let value = payload(upcoming::run_with_options(UpcomingRunOptions {
            as_of: Some(AS_OF.to_string()),
            home_override: Some(&home),
            ..UpcomingRunOptions::default()
        }));
        assert_eq!(names(&value["data"]["rows"]), vec!["Today"]);
        assert_eq!(value["data"]["rows"][0]["status_label"], "Today");
    }
}

#[test]
fn forecast_projects_constant_months_from_reference_month() {
    let temp = temp_home_in_tmp("subtrack-forecast");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(forecast::run_with_options(ForecastRunOptions {
            as_of: Some(AS_OF.to_string()),
            months: Some(3),
            home_override: Some(&home),
            ..ForecastRunOptions::default()
        }));
        let data = &value["data"];
        let rows = data["rows"].as_array().cloned().unwrap_or_default();

        let months = rows
            .iter()
            .filter_map(|row| row["month"].as_str())
            .collect::<Vec<&str>>();
        assert_eq!(months, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(rows[0]["month_start"], "2024-01-01");
        for row in &rows {
            assert!(approx_eq(&row["projected_amount"], household_monthly_total()));
        }
        assert!(approx_eq(&data["horizon_total"], household_monthly_total() * 3.0));
        assert!(approx_eq(&data["average_per_month"], household_monthly_total()));
        assert_eq!(data["upcoming_count"], 3);
        assert!(approx_eq(&data["upcoming_total"], 5.0 + 9.99 + 15.99));
    }
}

#[test]
fn forecast_defaults_to_a_year_and_rejects_long_horizons() {
    let temp = temp_home_in_tmp("subtrack-forecast-default");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(forecast::run_with_options(ForecastRunOptions {
            as_of: Some("2024-11-30".to_string()),
            home_override: Some(&home),
            ..ForecastRunOptions::default()
        }));
        let rows = value["data"]["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0]["month"], "Nov 2024");
        assert_eq!(rows[11]["month"], "Oct 2025");

        let too_long = forecast::run_with_options(ForecastRunOptions {
            as_of: Some(AS_OF.to_string()),
            months: Some(121),
            home_override: Some(&home),
            ..ForecastRunOptions::default()
        });
        assert!(too_long.is_err());
    }
}

#[test]
fn dash_combines_spend_renewals_and_categories() {
    let temp = temp_home_in_tmp("subtrack-dash");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(dash::run_with_options(source(&home)));
        let data = &value["data"];

        assert_eq!(data["active_subscriptions"], 5);
        assert!(approx_eq(&data["total_monthly_spend"], household_monthly_total()));
        assert_eq!(data["upcoming_window_days"], 30);
        assert_eq!(
            names(&data["upcoming_renewals"]),
            vec!["Coffee Club", "Spotify", "Netflix"]
        );
        assert_eq!(data["spend_by_category"].as_array().map(Vec::len), Some(3));
        assert_eq!(data["top_category"]["category"], "Health");
        assert!(approx_eq(&data["top_category"]["monthly_total"], 40.0));
    }
}

#[test]
fn dash_without_active_subscriptions_has_no_top_category() {
    let temp = temp_home_in_tmp("subtrack-dash-empty");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &[]);
        let value = payload(dash::run_with_options(source(&home)));
        assert!(value["data"]["top_category"].is_null());
    }
}

fn list_options<'a>(home: &'a std::path::Path) -> ListRunOptions<'a> {
    ListRunOptions {
        as_of: Some(AS_OF.to_string()),
        home_override: Some(home),
        ..ListRunOptions::default()
    }
}

#[test]
fn list_sorts_active_subscriptions_by_name_by_default() {
    let temp = temp_home_in_tmp("subtrack-list");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let value = payload(list::run_with_options(list_options(&home)));
        let data = &value["data"];

        assert_eq!(value["command"], "list");
        assert_eq!(data["sort"], "name");
        assert_eq!(data["matching"], 5);
        assert_eq!(
            names(&data["rows"]),
            vec!["Coffee Club", "Gym", "IDE License", "Netflix", "Spotify"]
        );
        assert!(approx_eq(&data["monthly_total"], household_monthly_total()));

        let gym = &data["rows"][1];
        assert!(approx_eq(&gym["monthly_cost"], 40.0));
        assert!(approx_eq(&gym["yearly_cost"], 480.0));
        assert_eq!(gym["days_until"], 46);
        assert_eq!(gym["status_label"], "In 46 days");
        assert_eq!(data["rows"][0]["status_label"], "Tomorrow");
        assert!(data.get("search").is_none());
    }
}

#[test]
fn list_sorts_by_cost_and_renewal() {
    let temp = temp_home_in_tmp("subtrack-list-sort");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let by_cost = payload(list::run_with_options(ListRunOptions {
            sort: Some("cost".to_string()),
            ..list_options(&home)
        }));
        assert_eq!(
            names(&by_cost["data"]["rows"]),
            vec!["Gym", "Coffee Club", "Netflix", "Spotify", "IDE License"]
        );

        let by_renewal = payload(list::run_with_options(ListRunOptions {
            sort: Some("renewal".to_string()),
            ..list_options(&home)
        }));
        assert_eq!(
            names(&by_renewal["data"]["rows"]),
            vec!["Coffee Club", "Spotify", "Netflix", "Gym", "IDE License"]
        );
    }
}

#[test]
fn list_filters_by_search_and_category() {
    let temp = temp_home_in_tmp("subtrack-list-filter");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let searched = payload(list::run_with_options(ListRunOptions {
            search: Some("FLIX".to_string()),
            ..list_options(&home)
        }));
        assert_eq!(names(&searched["data"]["rows"]), vec!["Netflix"]);
        assert_eq!(searched["data"]["search"], "FLIX");
        assert!(approx_eq(&searched["data"]["monthly_total"], 15.99));

        let other = payload(list::run_with_options(ListRunOptions {
            category: Some("other".to_string()),
            ..list_options(&home)
        }));
        assert_eq!(
            names(&other["data"]["rows"]),
            vec!["Coffee Club", "IDE License"]
        );
        assert_eq!(other["data"]["rows"][0]["category"], "Other");
    }
}

#[test]
fn list_includes_inactive_rows_only_when_asked() {
    let temp = temp_home_in_tmp("subtrack-list-inactive");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(&home, &household_rows());
        let news = ListRunOptions {
            category: Some("News".to_string()),
            ..list_options(&home)
        };
        let hidden = payload(list::run_with_options(news));
        assert_eq!(hidden["data"]["matching"], 0);

        let shown = payload(list::run_with_options(ListRunOptions {
            category: Some("News".to_string()),
            include_inactive: true,
            ..list_options(&home)
        }));
        let data = &shown["data"];
        assert_eq!(names(&data["rows"]), vec!["Old Magazine"]);
        assert_eq!(data["rows"][0]["status"], "cancelled");
        assert_eq!(data["include_inactive"], true);
        assert!(approx_eq(&data["monthly_total"], 0.0));
    }
}

#[test]
fn list_rejects_unknown_sort_before_reading_data() {
    let temp = temp_home_in_tmp("subtrack-list-bad-sort");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = list::run_with_options(ListRunOptions {
            sort: Some("price".to_string()),
            ..list_options(&home)
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("--sort"));
        }
    }
}

#[test]
fn bad_as_of_is_rejected_before_reading_data() {
    let temp = temp_home_in_tmp("subtrack-as-of");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = summary::run_with_options(SourceOptions {
            as_of: Some("2024-02-30".to_string()),
            home_override: Some(&home),
            ..SourceOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("--as-of"));
        }
    }
}

#[test]
fn unreadable_renewal_in_file_never_becomes_a_day_count() {
    let temp = temp_home_in_tmp("subtrack-bad-renewal");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_subscriptions(
            &home,
            &[subscription("Broken", 4.0, "monthly", "someday", None)],
        );
        let result = upcoming::run_with_options(UpcomingRunOptions {
            as_of: Some(AS_OF.to_string()),
            home_override: Some(&home),
            ..UpcomingRunOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "subscriptions_validation_failed");
            let issues = error
                .data
                .as_ref()
                .and_then(|data| data["issues"].as_array().cloned())
                .unwrap_or_default();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0]["code"], Value::String("invalid_date".to_string()));
        }
    }
}
