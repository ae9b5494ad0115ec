use super::pubsub_client::SubscriberBinding;
use crate::broker::message::{Attributes, Envelope};
use crate::utils::CallbackError;
use std::sync::{Arc, Mutex};

#[test]
fn test_binding_invokes_callback() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let mut binding = SubscriberBinding::new(
        "sub_0".to_string(),
        Box::new(move |env: &Envelope| -> Result<(), CallbackError> {
            sink.lock().unwrap().push(env.data().to_string());
            Ok(())
        }),
    );

    let env = Envelope::new("t", "hello".into(), Attributes::new());
    binding.invoke(&env).unwrap();

    assert_eq!(binding.id, "sub_0");
    assert_eq!(*seen.lock().unwrap(), vec!["hello".to_string()]);
}

#[test]
fn test_binding_returns_callback_error() {
    let mut binding = SubscriberBinding::new(
        "sub_1".to_string(),
        Box::new(|_: &Envelope| -> Result<(), CallbackError> { Err("boom".into()) }),
    );

    let env = Envelope::new("t", "x".into(), Attributes::new());
    let err = binding.invoke(&env).unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_binding_debug_hides_closure() {
    let binding = SubscriberBinding::new(
        "sub_2".to_string(),
        Box::new(|_: &Envelope| -> Result<(), CallbackError> { Ok(()) }),
    );
    let debug = format!("{binding:?}");
    assert!(debug.contains("sub_2"));
}
