use colstore_aggregate::{AggregateKind, AggregateNative, AggregateOutcome};
use colstore_result::Error;
use colstore_types::{Decimal, SqlDecimal, SqlInt64, Value};

fn dec(s: &str) -> SqlDecimal {
    SqlDecimal::new(s.parse::<Decimal>().unwrap())
}

fn run<T: AggregateNative>(kind: AggregateKind, values: &[Option<T>]) -> AggregateOutcome {
    T::aggregate(kind, values.iter().copied()).unwrap()
}

#[test]
fn int32_rows_with_a_null() {
    let rows = [Some(5), None, Some(10)];
    assert_eq!(run(AggregateKind::Sum, &rows), AggregateOutcome::Value(Value::Int32(15)));
    assert_eq!(run(AggregateKind::Mean, &rows), AggregateOutcome::Value(Value::Int32(7)));
    assert_eq!(run(AggregateKind::Min, &rows), AggregateOutcome::Value(Value::Int32(5)));
    assert_eq!(run(AggregateKind::Max, &rows), AggregateOutcome::Value(Value::Int32(10)));
    assert_eq!(run(AggregateKind::Count, &rows), AggregateOutcome::Value(Value::Int64(2)));
    assert_eq!(run(AggregateKind::First, &rows), AggregateOutcome::Value(Value::Int32(5)));
}

#[test]
fn empty_and_all_null_inputs() {
    let empty: [Option<i64>; 0] = [];
    let nulls: [Option<i64>; 3] = [None, None, None];
    for kind in [AggregateKind::Sum, AggregateKind::Mean, AggregateKind::Min, AggregateKind::Max] {
        assert_eq!(run(kind, &empty), AggregateOutcome::Null, "{kind} over no rows");
        assert_eq!(run(kind, &nulls), AggregateOutcome::Null, "{kind} over null rows");
    }
    assert_eq!(run(AggregateKind::Count, &nulls), AggregateOutcome::Value(Value::Int64(0)));
    assert_eq!(run(AggregateKind::First, &empty), AggregateOutcome::NoRows);
    assert_eq!(run(AggregateKind::First, &nulls), AggregateOutcome::Null);
}

#[test]
fn int64_sum_widens_before_narrowing() {
    let rows = [Some(i64::MAX), Some(i64::MAX), Some(i64::MIN), Some(i64::MIN)];
    assert_eq!(run(AggregateKind::Sum, &rows), AggregateOutcome::Value(Value::Int64(-2)));

    let err = i64::aggregate(AggregateKind::Sum, [Some(i64::MAX), Some(1)].into_iter()).unwrap_err();
    assert_eq!(err, Error::overflow("Int64"));
}

#[test]
fn sql_int64_overflow_names_the_sql_type() {
    let rows = [Some(SqlInt64::MAX_VALUE), Some(SqlInt64::new(1))];
    let err = SqlInt64::aggregate(AggregateKind::Sum, rows.into_iter()).unwrap_err();
    assert_eq!(err, Error::overflow("SqlInt64"));
    // Mean narrows only the quotient.
    assert_eq!(
        run(AggregateKind::Mean, &rows),
        AggregateOutcome::Value(Value::SqlInt64(SqlInt64::new(i64::MAX / 2 + 1)))
    );
}

#[test]
fn sql_decimal_dispersion_of_equal_values_is_zero() {
    let rows = [Some(dec("2.5")), Some(dec("2.5"))];
    assert_eq!(run(AggregateKind::Var, &rows), AggregateOutcome::Value(Value::Float64(0.0)));
    assert_eq!(run(AggregateKind::StDev, &rows), AggregateOutcome::Value(Value::Float64(0.0)));
    assert_eq!(run(AggregateKind::Var, &rows[..1]), AggregateOutcome::Null);
}

#[test]
fn sql_decimal_sum_and_mean() {
    let rows = [Some(dec("10.51")), None, Some(dec("10.52"))];
    let sum = run(AggregateKind::Sum, &rows);
    assert_eq!(sum, AggregateOutcome::Value(Value::SqlDecimal(dec("21.03"))));

    let AggregateOutcome::Value(Value::SqlDecimal(mean)) = run(AggregateKind::Mean, &rows) else {
        panic!("expected a decimal mean");
    };
    assert_eq!(mean.to_string(), "10.515000");

    let overflow = [Some(SqlDecimal::MAX_VALUE), Some(dec("1"))];
    assert_eq!(
        SqlDecimal::aggregate(AggregateKind::Sum, overflow.into_iter()).unwrap_err(),
        Error::overflow("SqlDecimal")
    );
}

#[test]
fn sql_decimal_near_max_sheds_fraction_digits() {
    let mean_rows = [Some(SqlDecimal::MAX_VALUE), Some(dec("0.5"))];
    let AggregateOutcome::Value(Value::SqlDecimal(mean)) = run(AggregateKind::Mean, &mean_rows)
    else {
        panic!("expected a decimal mean");
    };
    assert_eq!(mean.to_string(), format!("5{}", "0".repeat(37)));

    let sum_rows = [Some(SqlDecimal::MAX_VALUE), Some(dec("-0.5"))];
    assert_eq!(
        run(AggregateKind::Sum, &sum_rows),
        AggregateOutcome::Value(Value::SqlDecimal(SqlDecimal::MAX_VALUE))
    );

    let mean_of_extremes = [Some(SqlDecimal::MAX_VALUE), Some(SqlDecimal::MAX_VALUE)];
    assert_eq!(
        run(AggregateKind::Mean, &mean_of_extremes),
        AggregateOutcome::Value(Value::SqlDecimal(SqlDecimal::MAX_VALUE))
    );
}

#[test]
fn boolean_supports_only_order_kinds() {
    let rows = [Some(true), None, Some(false)];
    assert_eq!(run(AggregateKind::Min, &rows), AggregateOutcome::Value(Value::Boolean(false)));
    assert_eq!(run(AggregateKind::Max, &rows), AggregateOutcome::Value(Value::Boolean(true)));
    assert_eq!(run(AggregateKind::Count, &rows), AggregateOutcome::Value(Value::Int64(2)));
    for kind in [AggregateKind::Sum, AggregateKind::Mean, AggregateKind::Var, AggregateKind::StDev] {
        let err = bool::aggregate(kind, rows.into_iter()).unwrap_err();
        assert_eq!(err, Error::unsupported_aggregate(kind.name(), "Boolean"));
    }
}

#[test]
fn extremes_of_a_single_value() {
    for v in [i32::MIN, 0, i32::MAX] {
        let rows = [None, Some(v), None];
        assert_eq!(run(AggregateKind::Min, &rows), AggregateOutcome::Value(Value::Int32(v)));
        assert_eq!(run(AggregateKind::Max, &rows), AggregateOutcome::Value(Value::Int32(v)));
    }
}
