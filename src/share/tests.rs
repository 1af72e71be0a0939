use super::classifier::{Thresholds, trend_from_label};
use super::error::Error;
use super::payload::*;
use super::types::*;

const RANGE_SAMPLES: [i32; 12] = [-1, 0, 40, 64, 65, 79, 80, 81, 199, 200, 300, 301];

#[test]
fn range_boundaries_follow_operator_choice() {
    let t = Thresholds::default();
    assert_eq!(t.range(64), Range::UrgentLow);
    assert_eq!(t.range(65), Range::TooLow);
    assert_eq!(t.range(79), Range::TooLow);
    assert_eq!(t.range(80), Range::InRange);
    assert_eq!(t.range(199), Range::InRange);
    assert_eq!(t.range(200), Range::TooHigh);
    assert_eq!(t.range(300), Range::TooHigh);
    assert_eq!(t.range(301), Range::UrgentHigh);
}

#[test]
fn range_checks_urgent_bounds_first() {
    // Overlapping thresholds: urgent checks take precedence.
    let t = Thresholds {
        low: 100,
        high: 120,
        urgent_low: 110,
        urgent_high: 115,
    };
    assert_eq!(t.range(116), Range::UrgentHigh);
    assert_eq!(t.range(105), Range::UrgentLow);
    assert_eq!(t.range(112), Range::InRange);
}

#[test]
fn every_label_maps_to_its_trend() {
    for trend in Trend::ALL {
        assert_eq!(trend_from_label(trend.as_str()), trend);
    }
}

#[test]
fn unknown_labels_are_not_computable() {
    for label in ["", "flat", "FLAT", "Flat ", "None", "4"] {
        assert_eq!(trend_from_label(label), Trend::NotComputable);
    }
}

#[test]
fn advanced_trend_matches_high_low_split() {
    let t = Thresholds::default();
    for trend in Trend::ALL {
        for value in RANGE_SAMPLES {
            let advanced = t.advanced_trend(value, trend);
            if !trend.is_directional() {
                assert_eq!(advanced, AdvancedTrend::Unknown);
                continue;
            }
            let name = advanced.as_str();
            assert!(name.starts_with(trend.as_str()), "{name} for {trend}");
            let zone = &name[trend.as_str().len()..];
            let expected = if value > t.high {
                "High"
            } else if value > t.low {
                "InRange"
            } else {
                "Low"
            };
            assert_eq!(zone, expected, "value {value} trend {trend}");
        }
    }
}

#[test]
fn advanced_trend_is_strict_at_thresholds() {
    let t = Thresholds::default();
    assert_eq!(t.advanced_trend(200, Trend::Flat), AdvancedTrend::FlatInRange);
    assert_eq!(t.advanced_trend(201, Trend::Flat), AdvancedTrend::FlatHigh);
    assert_eq!(t.advanced_trend(80, Trend::SingleDown), AdvancedTrend::SingleDownLow);
    assert_eq!(t.advanced_trend(81, Trend::SingleDown), AdvancedTrend::SingleDownInRange);
}

#[test]
fn token_from_json_string() {
    assert_eq!(extract_token("\"abc123\"").as_str(), "abc123");
    assert_eq!(extract_token("  \"abc123\"\r\n").as_str(), "abc123");
}

#[test]
fn token_escapes_are_decoded() {
    assert_eq!(extract_token(r#""ab\/cd""#).as_str(), "ab/cd");
    assert_eq!(extract_token(r#""ab\"cd""#).as_str(), "ab\"cd");
    assert_eq!(extract_token(r#""ab\\cd""#).as_str(), "ab\\cd");
}

#[test]
fn decoded_token_is_sent_back_verbatim() {
    let token = extract_token(r#""ab\/cd""#);
    let mut buf = [0u8; MAX_PAYLOAD_LEN];
    let payload = encode(
        &ReadingsRequest {
            session_id: &token,
            minutes: 10,
            max_count: 1,
        },
        &mut buf,
    )
    .unwrap();
    assert_eq!(
        core::str::from_utf8(payload).unwrap(),
        r#"{"sessionId":"ab/cd","minutes":10,"maxCount":1}"#
    );
}

#[test]
fn token_without_two_quotes_is_empty() {
    assert_eq!(extract_token("abc123").as_str(), "");
    assert_eq!(extract_token("\"abc123").as_str(), "");
    assert_eq!(extract_token("").as_str(), "");
}

#[test]
fn token_falls_back_to_outer_quotes() {
    // Not a single JSON string, so the first/last quote scan applies.
    assert_eq!(extract_token("id=\"abc\" \"def\"").as_str(), "abc\" \"def");
    assert_eq!(strip_quotes("x\"y\"z"), "y");
    assert_eq!(strip_quotes("\""), "");
}

#[test]
fn oversized_token_is_empty() {
    let mut body: heapless::String<128> = heapless::String::new();
    body.push('"').unwrap();
    for _ in 0..MAX_TOKEN_LEN + 1 {
        body.push('a').unwrap();
    }
    body.push('"').unwrap();
    assert!(extract_token(&body).is_empty());
}

#[test]
fn timestamp_drops_timezone_offset() {
    assert_eq!(parse_timestamp("Date(1500000000000-0700)"), Some(1500000000000));
    assert_eq!(parse_timestamp("Date(1500000000000+0200)"), Some(1500000000000));
    assert_eq!(parse_timestamp("Date(1600000000000)"), Some(1600000000000));
}

#[test]
fn malformed_timestamps_are_rejected() {
    assert_eq!(parse_timestamp("Date(1600000000000"), None);
    assert_eq!(parse_timestamp("Date()"), None);
    assert_eq!(parse_timestamp("Date(abc)"), None);
    assert_eq!(parse_timestamp("/Date(1600000000000)/"), None);
}

#[test]
fn reading_from_valid_record() {
    let reading = parse_reading(
        r#"{"Value":250,"Trend":"Flat","WT":"Date(1600000000000)"}"#,
        &Thresholds::default(),
    )
    .unwrap();
    assert_eq!(
        reading,
        Reading {
            value: 250,
            trend: Trend::Flat,
            advanced_trend: AdvancedTrend::FlatHigh,
            range: Range::TooHigh,
            timestamp: 1600000000000,
        }
    );
}

#[test]
fn reading_ignores_extra_fields() {
    let reading = parse_reading(
        r#"{"WT":"Date(1691455258000)","ST":"Date(1691455258000)","DT":"Date(1691455258000-0400)","Value":96,"Trend":"FortyFiveDown"}"#,
        &Thresholds::default(),
    )
    .unwrap();
    assert_eq!(reading.value, 96);
    assert_eq!(reading.trend, Trend::FortyFiveDown);
    assert_eq!(reading.advanced_trend, AdvancedTrend::FortyFiveDownInRange);
    assert_eq!(reading.range, Range::InRange);
    assert_eq!(reading.timestamp, 1691455258000);
}

#[test]
fn invalid_records_are_rejected() {
    let t = Thresholds::default();
    for record in [
        r#"{"Value":250,"WT":"Date(1600000000000)"}"#,
        r#"{"Value":"250","Trend":"Flat","WT":"Date(1600000000000)"}"#,
        r#"{"Value":250,"Trend":4,"WT":"Date(1600000000000)"}"#,
        r#"{"Value":250,"Trend":"Flat","WT":"1600000000000"}"#,
        r#"{"Value":250,"Trend":"Flat"}"#,
        r#"[1,2]"#,
        r#"250"#,
    ] {
        assert_eq!(parse_reading(record, &t), Err(Error::Json), "{record}");
    }
}

#[test]
fn readings_keep_order_and_skip_invalid() {
    let body = r#"[
        {"Value":120,"Trend":"SingleUp","WT":"Date(1600000300000)"},
        {"Value":118,"WT":"Date(1600000000000)"},
        {"Value":60,"Trend":"DoubleDown","WT":"Date(1599999700000-0500)"}
    ]"#;
    let readings = parse_readings(body, &Thresholds::default()).unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].value, 120);
    assert_eq!(readings[0].advanced_trend, AdvancedTrend::SingleUpInRange);
    assert_eq!(readings[1].value, 60);
    assert_eq!(readings[1].range, Range::UrgentLow);
    assert_eq!(readings[1].timestamp, 1599999700000);
}

#[test]
fn readings_body_must_be_an_array() {
    let t = Thresholds::default();
    assert_eq!(parse_readings("", &t), Err(Error::Json));
    assert_eq!(parse_readings("{}", &t), Err(Error::Json));
    assert_eq!(parse_readings("[{\"Value\":1}", &t), Err(Error::Json));
    assert_eq!(parse_readings("[{\"Value\":1},]", &t), Err(Error::Json));
    assert!(parse_readings("[]", &t).unwrap().is_empty());
    assert!(parse_readings(" [ ] ", &t).unwrap().is_empty());
}

#[test]
fn array_elements_skip_nested_separators() {
    let mut elements = ArrayElements::new(r#"[{"a":"x,]y"}, [1, 2] ,"q\"," , 3]"#).unwrap();
    assert_eq!(elements.next(), Some(Ok(r#"{"a":"x,]y"}"#)));
    assert_eq!(elements.next(), Some(Ok("[1, 2]")));
    assert_eq!(elements.next(), Some(Ok(r#""q\",""#)));
    assert_eq!(elements.next(), Some(Ok("3")));
    assert_eq!(elements.next(), None);
}

#[test]
fn array_elements_stop_on_unbalanced_input() {
    let mut elements = ArrayElements::new("[}, 1]").unwrap();
    assert_eq!(elements.next(), Some(Err(Error::Json)));
    assert_eq!(elements.next(), None);
}

#[test]
fn server_error_codes_map_to_status() {
    let cases = [
        (r#"{"Code":"SessionNotValid"}"#, Some(AccountStatus::SessionNotValid)),
        (r#"{"Code":"SessionIdNotFound","Message":"sessionIdNotFound"}"#, Some(AccountStatus::SessionNotFound)),
        (r#"{"Code":"SSO_AuthenticateAccountNotFound"}"#, Some(AccountStatus::AccountNotFound)),
        (r#"{"Code":"AccountPasswordInvalid"}"#, Some(AccountStatus::PasswordInvalid)),
        (r#"{"Code":"SSO_AuthenticateMaxAttemptsExceeed"}"#, Some(AccountStatus::MaxAttemptsExceeded)),
        (r#"{"Code":"InvalidArgument","Message":"accountName"}"#, Some(AccountStatus::UsernameNullEmpty)),
        (r#"{"Code":"InvalidArgument","Message":"password"}"#, Some(AccountStatus::PasswordNullEmpty)),
        (r#"{"Code":"InvalidArgument","Message":"applicationId"}"#, None),
        (r#"{"Code":"SomethingElse"}"#, None),
    ];
    for (json, expected) in cases {
        assert_eq!(classify_server_error(json), expected, "{json}");
    }
}

#[test]
fn later_server_error_codes_win() {
    let json = r#"{"Code":"SessionNotValid","Message":"AccountPasswordInvalid"}"#;
    assert_eq!(classify_server_error(json), Some(AccountStatus::PasswordInvalid));
}

#[test]
fn error_object_isolated_from_body() {
    assert_eq!(error_object("junk {\"a\":{\"b\":1}} tail"), "{\"a\":{\"b\":1}}");
    assert_eq!(error_object("no braces"), "");
    assert_eq!(error_object("} {"), "");
}

#[test]
fn payloads_are_escaped() {
    let mut buf = [0u8; MAX_PAYLOAD_LEN];
    let payload = encode(
        &AuthenticateRequest {
            account_name: "me\"you",
            password: "a\\b",
            application_id: "app",
        },
        &mut buf,
    )
    .unwrap();
    assert_eq!(
        core::str::from_utf8(payload).unwrap(),
        r#"{"accountName":"me\"you","password":"a\\b","applicationId":"app"}"#
    );
}

#[test]
fn readings_payload_shape() {
    let mut buf = [0u8; MAX_PAYLOAD_LEN];
    let payload = encode(
        &ReadingsRequest {
            session_id: "sid",
            minutes: 10,
            max_count: 1,
        },
        &mut buf,
    )
    .unwrap();
    assert_eq!(
        core::str::from_utf8(payload).unwrap(),
        r#"{"sessionId":"sid","minutes":10,"maxCount":1}"#
    );
}

#[test]
fn sentinel_reading_is_invalid() {
    assert!(!Reading::UNAVAILABLE.is_valid());
    assert_eq!(Reading::UNAVAILABLE.value, -1);
    assert_eq!(Reading::UNAVAILABLE.range, Range::InRange);
}

#[test]
fn mmol_conversion_rounds_to_tenths() {
    let reading = |value| Reading {
        value,
        ..Reading::UNAVAILABLE
    };
    assert_eq!(reading(100).mmol_l(), 5.6);
    assert_eq!(reading(180).mmol_l(), 10.0);
    assert_eq!(reading(0).mmol_l(), 0.0);
}

#[test]
fn json_headers_report_capacity_as_network_overflow() {
    let headers = super::client::json_headers::<2>().unwrap();
    assert_eq!(headers[0].name.as_str(), "Content-Type");
    assert_eq!(headers[1].name.as_str(), "Accept");
    assert!(headers.iter().all(|h| h.value.as_str() == "application/json"));

    let err = super::client::json_headers::<1>().unwrap_err();
    assert_eq!(err, Error::Network(crate::network::error::Error::BufferOverflow));
}
