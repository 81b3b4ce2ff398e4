#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn test_emit_reaches_subscriber() {
    let signal: Signal<i32> = Signal::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = seen.clone();
    let sub = signal.subscribe(move |v| sink.borrow_mut().push(*v));

    signal.emit(&1);
    signal.emit(&2);
    assert_eq!(*seen.borrow(), vec![1, 2]);

    signal.unsubscribe(sub);
}

#[test]
fn test_emit_without_subscribers_is_noop() {
    let signal: Signal<&str> = Signal::new();
    signal.emit(&"nobody home");
    assert_eq!(signal.subscriber_count(), 0);
}

#[test]
fn test_multiple_subscribers_in_order() {
    let signal: Signal<()> = Signal::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let first = order.clone();
    let a = signal.subscribe(move |_| first.borrow_mut().push("a"));
    let second = order.clone();
    let b = signal.subscribe(move |_| second.borrow_mut().push("b"));

    signal.emit(&());
    assert_eq!(*order.borrow(), vec!["a", "b"]);

    signal.unsubscribe(a);
    signal.unsubscribe(b);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let signal: Signal<i32> = Signal::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = seen.clone();
    let sub = signal.subscribe(move |v| sink.borrow_mut().push(*v));

    signal.emit(&1);
    signal.unsubscribe(sub);
    signal.emit(&2);

    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(signal.subscriber_count(), 0);
}

#[test]
fn test_unsubscribe_leaves_other_subscribers() {
    let signal: Signal<i32> = Signal::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let keep_sink = seen.clone();
    let keep = signal.subscribe(move |v| keep_sink.borrow_mut().push(*v));
    let drop_sink = seen.clone();
    let dropped = signal.subscribe(move |v| drop_sink.borrow_mut().push(-*v));

    signal.unsubscribe(dropped);
    signal.emit(&5);

    assert_eq!(*seen.borrow(), vec![5]);
    signal.unsubscribe(keep);
}

#[test]
fn test_observer_state_mutates_across_emits() {
    let signal: Signal<()> = Signal::new();
    let count = Rc::new(RefCell::new(0));

    let sink = count.clone();
    let mut local = 0;
    let sub = signal.subscribe(move |_| {
        local += 1;
        *sink.borrow_mut() = local;
    });

    signal.emit(&());
    signal.emit(&());
    signal.emit(&());
    assert_eq!(*count.borrow(), 3);

    signal.unsubscribe(sub);
}
