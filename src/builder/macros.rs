//! Macros for ergonomic chart registration.

/// Register events on a builder, binding each id to a local of the same name.
///
/// # Example
///
/// ```
/// use hfsm::builder::StateMachineBuilder;
/// use hfsm::events;
///
/// let mut builder = StateMachineBuilder::<()>::new();
/// events!(builder; run, stop);
///
/// assert_ne!(run, stop);
/// ```
#[macro_export]
macro_rules! events {
    ($builder:ident; $($event:ident),* $(,)?) => {
        $(
            let $event = $builder.event(stringify!($event));
        )*
    };
}

/// Register data-less, callback-less states on a builder, binding each id
/// to a local of the same name. `child: parent` nests under an earlier one.
///
/// # Example
///
/// ```
/// use hfsm::builder::StateMachineBuilder;
/// use hfsm::states;
///
/// let mut builder = StateMachineBuilder::<()>::new();
/// states!(builder; stopped, running, cooling: running, heating: running);
///
/// let chart = builder.build().unwrap();
/// assert_eq!(chart.parent(cooling), Some(running));
/// assert_eq!(chart.parent(stopped), None);
/// # let _ = heating;
/// ```
#[macro_export]
macro_rules! states {
    ($builder:ident; $($state:ident $(: $parent:ident)?),* $(,)?) => {
        $(
            let $state = $builder.add_state(
                $crate::builder::StateSpec::new(stringify!($state)) $(.parent($parent))?
            );
        )*
    };
}
