use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use dynmock::example::{methods, Calculator, CalculatorProxy};
use dynmock::matcher::any;
use dynmock::{matchers, EventHandler, InvocationShape, Value};

fn recorder() -> (EventHandler, Arc<AtomicI32>) {
    let total = Arc::new(AtomicI32::new(0));
    let handler: EventHandler = {
        let total = total.clone();

        Arc::new(move |args: &[Value]| {
            for arg in args {
                if let Some(x) = arg.downcast_ref::<i32>() {
                    total.fetch_add(*x, Ordering::SeqCst);
                }
            }
        })
    };

    (handler, total)
}

#[test]
fn subscribed_handlers_receive_raised_events() {
    let calc = CalculatorProxy::new();
    let (handler, total) = recorder();

    calc.subscribe_changed(handler.clone());
    calc.mock().raise("changed", &[Value::new(2), Value::new(3)]);
    assert_eq!(5, total.load(Ordering::SeqCst));

    calc.unsubscribe_changed(handler);
    calc.mock().raise("changed", &[Value::new(2)]);
    assert_eq!(5, total.load(Ordering::SeqCst));
}

#[test]
fn setup_raises_event() {
    let calc = CalculatorProxy::new();
    let (handler, total) = recorder();

    calc.mock()
        .setup(InvocationShape::new(methods::RESET.clone(), matchers![]).unwrap())
        .raises("changed", vec![Value::new(10)]);
    calc.mock()
        .setup(InvocationShape::new(methods::ADD.clone(), matchers![any(), any()]).unwrap())
        .returns(0)
        .unwrap()
        .raises_with("changed", |invocation| invocation.arguments().to_vec());

    calc.mock().add_event_handler("changed", handler);

    calc.reset();
    assert_eq!(10, total.load(Ordering::SeqCst));

    calc.add(1, 2);
    assert_eq!(13, total.load(Ordering::SeqCst));
}

#[test]
fn remove_unknown_handler() {
    let calc = CalculatorProxy::new();
    let (handler, _) = recorder();

    assert!(!calc.mock().remove_event_handler("changed", &handler));
}
