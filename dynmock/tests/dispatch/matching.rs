use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use dynmock::example::{methods, Calculator, CalculatorProxy};
use dynmock::matcher::{any, eq, gt, is, lazy, range};
use dynmock::{matchers, InvocationShape, Matcher, Value};

fn add(matchers: Vec<Box<dyn Matcher>>) -> InvocationShape {
    InvocationShape::new(methods::ADD.clone(), matchers).unwrap()
}

#[test]
fn later_setup_overrides_identical_one() {
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.setup(add(matchers![any(), any()])).returns(1).unwrap();
    mock.setup(add(matchers![any(), any()])).returns(2).unwrap();

    assert_eq!(2, calc.add(3, 4));

    let setups = mock.setups();
    assert!(setups[0].is_overridden);
    assert!(!setups[1].is_overridden);
}

#[test]
fn most_recent_setup_wins() {
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.setup(add(matchers![any(), any()])).returns(20).unwrap();
    mock.setup(add(matchers![eq(1), any()])).returns(10).unwrap();

    assert_eq!(10, calc.add(1, 2));
    assert_eq!(20, calc.add(2, 2));

    mock.setup(add(matchers![any(), any()])).returns(30).unwrap();

    assert_eq!(30, calc.add(1, 2));
}

#[test]
fn false_guard_never_matches() {
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.when(|| false)
        .setup(add(matchers![any(), any()]))
        .returns(5)
        .unwrap();

    assert_eq!(0, calc.add(1, 2));
    assert_eq!(0, mock.setups()[0].invocation_count);
    assert_eq!(1, mock.unmatched_invocations().len());
}

#[test]
fn guard_is_evaluated_for_each_call() {
    let enabled = Arc::new(AtomicBool::new(false));
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.setup(add(matchers![any(), any()])).returns(1).unwrap();
    {
        let enabled = enabled.clone();

        mock.when(move || enabled.load(Ordering::SeqCst))
            .setup(add(matchers![any(), any()]))
            .returns(2)
            .unwrap();
    }

    assert_eq!(1, calc.add(0, 0));
    assert!(!mock.setups()[0].is_overridden);

    enabled.store(true, Ordering::SeqCst);
    assert_eq!(2, calc.add(0, 0));

    let setups = mock.setups();
    assert!(setups[0].is_overridden);
    assert!(setups[1].is_conditional);

    enabled.store(false, Ordering::SeqCst);
    assert_eq!(0, calc.add(0, 0));
    assert_eq!(1, mock.unmatched_invocations().len());
}

#[test]
fn typed_predicates() {
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.setup(add(matchers![gt(10), is(|b: &i32| b % 2 == 0)]))
        .returns(1)
        .unwrap();

    assert_eq!(1, calc.add(11, 4));
    assert_eq!(0, calc.add(10, 4));
    assert_eq!(0, calc.add(11, 3));
}

#[test]
fn lazy_argument_is_evaluated_on_each_call() {
    let expected = Arc::new(AtomicI32::new(1));
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    {
        let expected = expected.clone();

        mock.setup(add(matchers![
            lazy(move || Some(Value::new(expected.load(Ordering::SeqCst)))),
            any()
        ]))
        .returns(42)
        .unwrap();
    }

    assert_eq!(42, calc.add(1, 0));

    expected.store(2, Ordering::SeqCst);
    assert_eq!(0, calc.add(1, 0));
    assert_eq!(42, calc.add(2, 0));
}

#[test]
fn variadic_arguments() {
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.setup(InvocationShape::new(methods::SUM_ALL.clone(), matchers![eq(1), eq(2)]).unwrap())
        .returns(100)
        .unwrap();

    assert_eq!(100, calc.sum_all(&[1, 2]));
    assert_eq!(0, calc.sum_all(&[1, 2, 3]));
    assert_eq!(0, calc.sum_all(&[]));
}

#[test]
fn single_variadic_argument() {
    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.setup(InvocationShape::new(methods::SUM_ALL.clone(), matchers![eq(1)]).unwrap())
        .returns(7)
        .unwrap();
    mock.setup(InvocationShape::new(methods::SUM_ALL.clone(), matchers![eq(2)]).unwrap())
        .returns(8)
        .unwrap();

    assert_eq!(7, calc.sum_all(&[1]));
    assert_eq!(8, calc.sum_all(&[2]));
    assert_eq!(0, calc.sum_all(&[1, 1]));
    assert!(!mock.setups()[0].is_overridden);
}

#[test]
fn variadic_arguments_matched_as_a_whole() {
    let calc = CalculatorProxy::new();

    calc.mock()
        .setup(InvocationShape::new(methods::SUM_ALL.clone(), matchers![any()]).unwrap())
        .returns(9)
        .unwrap();

    assert_eq!(9, calc.sum_all(&[]));
    assert_eq!(9, calc.sum_all(&[1, 2, 3]));
}

#[test]
fn range_of_arguments() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(add(matchers![range(4..=6), any()]))
        .returns(1)
        .unwrap();

    assert_eq!(1, calc.add(4, 0));
    assert_eq!(1, calc.add(6, 0));
    assert_eq!(0, calc.add(7, 0));
    assert_eq!(0, calc.add(3, 0));
}

#[test]
fn lazy_arguments_with_different_values_do_not_override() {
    fn lazy_add(x: i32) -> InvocationShape {
        add(matchers![lazy(move || Some(Value::new(x))), any()])
    }

    let calc = CalculatorProxy::new();
    let mock = calc.mock();

    mock.setup(lazy_add(1)).returns(10).unwrap();
    mock.setup(lazy_add(2)).returns(20).unwrap();

    assert_eq!(10, calc.add(1, 0));
    assert_eq!(20, calc.add(2, 0));

    let setups = mock.setups();
    assert!(!setups[0].is_overridden);
    assert!(!setups[1].is_overridden);
}
