//! Message trait for event payloads.

/// A marker trait for payloads travelling through the system.
///
/// Messages must be `Send + Sync + 'static` to be safe for async use.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct Reading { sensor: u32, value: f64 }
///
/// impl Message for Reading {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "All payloads in Sheaf must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

macro_rules! impl_message {
    ($($ty:ty),* $(,)?) => {
        $(impl Message for $ty {})*
    };
}

impl_message!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
impl<T: Message, E: Message> Message for Result<T, E> {}
