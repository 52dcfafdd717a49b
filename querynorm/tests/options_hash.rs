use querynorm::{
    FieldName, OptionValue, OptionsError, OptionsHash, asc, desc,
    value::OptionMap,
};

fn written(key: &str, value: impl Into<OptionValue>) -> OptionsHash {
    let mut options = OptionsHash::new();
    options.insert(key, value).expect("write should normalize");
    options
}

fn sort_of(keys: Vec<querynorm::SortKey>) -> OptionValue {
    OptionValue::from(keys)
}

fn syms(names: &[&str]) -> OptionValue {
    OptionValue::Seq(names.iter().copied().map(OptionValue::sym).collect())
}

fn strs(names: &[&str]) -> OptionValue {
    OptionValue::Seq(names.iter().copied().map(OptionValue::from).collect())
}

#[test]
fn plain_keys_read_back_from_seed() {
    let options = OptionsHash::from_seed([("skip", 1), ("limit", 1)]).expect("seed");
    assert_eq!(options.get("skip"), Some(&OptionValue::Int(1)));
    assert_eq!(options.get("limit"), Some(&OptionValue::Int(1)));
    assert_eq!(options.keys().collect::<Vec<_>>(), ["skip", "limit"]);
}

#[test]
fn order_becomes_sort() {
    let options = OptionsHash::from_seed([("order", OptionValue::sym("foo"))]).expect("seed");
    assert_eq!(options.get("order"), None);
    assert_eq!(options.get("sort"), Some(&sort_of(vec![asc("foo")])));
}

#[test]
fn select_becomes_fields() {
    let options = OptionsHash::from_seed([("select", "foo")]).expect("seed");
    assert_eq!(options.get("select"), None);
    assert_eq!(options.get("fields"), Some(&strs(&["foo"])));
}

#[test]
fn offset_becomes_skip() {
    let options = OptionsHash::from_seed([("offset", 1)]).expect("seed");
    assert_eq!(options.get("offset"), None);
    assert_eq!(options.get("skip"), Some(&OptionValue::Int(1)));
}

#[test]
fn canonical_keys_default_to_none() {
    let options = OptionsHash::new();
    for key in ["fields", "sort", "limit", "skip"] {
        assert_eq!(options.get(key), None, "{key} should be unset");
    }
}

#[test]
fn fields_empty_string_and_empty_array_clear() {
    assert_eq!(written("fields", "").get("fields"), None);
    assert_eq!(written("fields", Vec::<OptionValue>::new()).get("fields"), None);
}

#[test]
fn fields_array_of_strings() {
    assert_eq!(written("fields", vec!["one", "two"]).get("fields"), Some(&strs(&["one", "two"])));
}

#[test]
fn fields_flattens_nested_array() {
    let nested = OptionValue::Seq(vec![syms(&["one", "two"])]);
    assert_eq!(written("fields", nested).get("fields"), Some(&syms(&["one", "two"])));
}

#[test]
fn fields_single_symbol() {
    assert_eq!(written("fields", FieldName::new("one")).get("fields"), Some(&syms(&["one"])));
}

#[test]
fn fields_array_of_symbols() {
    assert_eq!(written("fields", syms(&["one", "two"])).get("fields"), Some(&syms(&["one", "two"])));
}

#[test]
fn fields_weight_mapping() {
    let weights: OptionValue = [("one", 1), ("two", -1)].into_iter().collect();
    assert_eq!(written("fields", weights.clone()).get("fields"), Some(&weights));
}

#[test]
fn fields_comma_separated_list() {
    assert_eq!(written("fields", "one, two").get("fields"), Some(&strs(&["one", "two"])));
}

#[test]
fn fields_set_through_select() {
    let options = written("select", "one, two");
    assert_eq!(options.get("select"), None);
    assert_eq!(options.get("fields"), Some(&strs(&["one", "two"])));
}

#[test]
fn limit_and_skip_accept_integers_and_numeric_strings() {
    assert_eq!(written("limit", 1).limit(), Some(1));
    assert_eq!(written("limit", "1").limit(), Some(1));
    assert_eq!(written("skip", 1).skip(), Some(1));
    assert_eq!(written("skip", "1").skip(), Some(1));
    assert_eq!(written("skip", 0).get("skip"), Some(&OptionValue::Int(0)));
}

#[test]
fn skip_set_from_offset_string() {
    let options = written("offset", "1");
    assert_eq!(options.get("offset"), None);
    assert_eq!(options.skip(), Some(1));
}

#[test]
fn non_numeric_limit_is_invalid() {
    let mut options = OptionsHash::new();
    let err = options.insert("limit", "lots").expect_err("non-numeric limit");
    assert!(matches!(err, OptionsError::InvalidArgument { ref key, .. } if key == "limit"));
    assert_eq!(options.limit(), None);
}

#[test]
fn sort_natural_order_mapping_is_kept() {
    for direction in [1, -1] {
        let natural: OptionValue = [("$natural", direction)].into_iter().collect();
        assert_eq!(written("sort", natural.clone()).get("sort"), Some(&natural));
    }
}

#[test]
fn sort_single_field_strings() {
    assert_eq!(written("sort", "foo asc").get("sort"), Some(&sort_of(vec![asc("foo")])));
    assert_eq!(written("sort", "foo ASC").get("sort"), Some(&sort_of(vec![asc("foo")])));
    assert_eq!(written("sort", "foo desc").get("sort"), Some(&sort_of(vec![desc("foo")])));
    assert_eq!(written("sort", "foo DESC").get("sort"), Some(&sort_of(vec![desc("foo")])));
}

#[test]
fn sort_multiple_field_strings() {
    assert_eq!(
        written("sort", "foo desc, bar asc").get("sort"),
        Some(&sort_of(vec![desc("foo"), asc("bar")]))
    );
    assert_eq!(
        written("sort", "foo desc, bar, baz").get("sort"),
        Some(&sort_of(vec![desc("foo"), asc("bar"), asc("baz")]))
    );
}

#[test]
fn sort_symbol() {
    assert_eq!(written("sort", FieldName::new("name")).get("sort"), Some(&sort_of(vec![asc("name")])));
}

#[test]
fn sort_operator() {
    assert_eq!(
        written("sort", FieldName::new("foo").desc()).get("sort"),
        Some(&sort_of(vec![desc("foo")]))
    );
}

#[test]
fn sort_array_of_operators() {
    let value = OptionValue::from(vec![FieldName::new("foo").desc(), FieldName::new("bar").asc()]);
    assert_eq!(written("sort", value).get("sort"), Some(&sort_of(vec![desc("foo"), asc("bar")])));
}

#[test]
fn sort_array_of_symbols() {
    assert_eq!(
        written("sort", syms(&["first_name", "last_name"])).get("sort"),
        Some(&sort_of(vec![asc("first_name"), asc("last_name")]))
    );
}

#[test]
fn sort_array_of_pairs() {
    let pair = |field: &str, direction: i64| OptionValue::Seq(vec![OptionValue::from(field), OptionValue::Int(direction)]);
    assert_eq!(
        written("sort", OptionValue::Seq(vec![pair("foo", -1)])).get("sort"),
        Some(&sort_of(vec![desc("foo")]))
    );
    assert_eq!(
        written("sort", OptionValue::Seq(vec![pair("foo", -1), pair("bar", 1)])).get("sort"),
        Some(&sort_of(vec![desc("foo"), asc("bar")]))
    );
}

#[test]
fn sort_compacts_nulls() {
    let value = OptionValue::Seq(vec![OptionValue::Null, OptionValue::from(desc("foo"))]);
    assert_eq!(written("sort", value).get("sort"), Some(&sort_of(vec![desc("foo")])));
}

#[test]
fn sort_mixed_operators_and_strings() {
    let value = OptionValue::Seq(vec![OptionValue::from(desc("foo")), OptionValue::from("bar")]);
    assert_eq!(written("sort", value).get("sort"), Some(&sort_of(vec![desc("foo"), asc("bar")])));
}

#[test]
fn sort_renames_id() {
    let value = OptionValue::from(vec![FieldName::new("id").asc()]);
    assert_eq!(written("sort", value).get("sort"), Some(&sort_of(vec![asc("_id")])));
}

#[test]
fn sort_natural_string() {
    assert_eq!(written("sort", "$natural desc").get("sort"), Some(&sort_of(vec![desc("$natural")])));
}

#[test]
fn sort_drops_malformed_segments() {
    assert_eq!(
        written("sort", "foo desc,, bar,").get("sort"),
        Some(&sort_of(vec![desc("foo"), asc("bar")]))
    );
}

#[test]
fn repeated_reads_are_stable() {
    let options = written("order", "foo desc");
    let first = options.get("sort").cloned();
    assert_eq!(options.get("sort").cloned(), first);
    assert_eq!(options.get("sort").cloned(), first);
}

#[test]
fn canonical_map_hands_off_in_insertion_order() {
    let mut options = OptionsHash::new();
    options.insert("hint", "name_1").expect("hint");
    options.insert("order", "name").expect("order");
    options.insert("limit", "10").expect("limit");

    let inner: OptionMap = options.into_inner();
    assert_eq!(inner.keys().collect::<Vec<_>>(), ["hint", "sort", "limit"]);
}

#[test]
fn sort_pair_with_direction_token() {
    let value = OptionValue::Seq(vec![OptionValue::Seq(vec![OptionValue::from("foo"), OptionValue::from("desc")])]);
    assert_eq!(written("sort", value).get("sort"), Some(&sort_of(vec![desc("foo")])));
}

#[test]
fn sort_pair_direction_sign_decides() {
    let options = OptionsHash::from_json_str(r#"{"sort": [["foo", -5], ["bar", 2]]}"#).expect("json seed");
    assert_eq!(options.get("sort"), Some(&sort_of(vec![desc("foo"), asc("bar")])));

    let err = OptionsHash::from_json_str(r#"{"sort": [["foo", 0]]}"#).expect_err("zero has no direction");
    assert!(matches!(err, OptionsError::InvalidArgument { ref key, .. } if key == "sort"));
}

#[test]
fn bounds_beyond_i64_are_invalid_in_every_form() {
    for source in [
        r#"{"limit": 18446744073709551615}"#,
        r#"{"limit": "18446744073709551615"}"#,
        r#"{"skip": 1e300}"#,
        r#"{"offset": "-9223372036854775809"}"#,
    ] {
        let err = OptionsHash::from_json_str(source).expect_err(source);
        assert!(matches!(err, OptionsError::InvalidArgument { .. }), "{source} should be rejected");
    }

    let options = OptionsHash::from_json_str(r#"{"limit": 9223372036854775807, "skip": "-9223372036854775808"}"#)
        .expect("i64 extremes fit");
    assert_eq!(options.limit(), Some(i64::MAX));
    assert_eq!(options.skip(), Some(i64::MIN));
}
