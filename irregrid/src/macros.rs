#[cfg(feature = "tracing")]
macro_rules! gtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "irregrid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! gtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! gdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "irregrid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! gdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! gwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "irregrid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! gwarn {
    ($($tt:tt)*) => {};
}
