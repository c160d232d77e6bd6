mod dispatch;
mod picker;

pub use dispatch::{Host, HostOptions};
pub use picker::{HeadlessPicker, NativePicker, Picker, PickerKind, picker_for, picker_from_env};
