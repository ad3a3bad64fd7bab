pub(crate) mod clock;
pub(crate) mod layout;
pub(crate) mod metrics;
pub(crate) mod plan;
pub(crate) mod transitions;
