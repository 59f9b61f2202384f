/// Build a [`FieldDef`](super::FieldDef) literal, filling unspecified attributes from `FieldDef::EMPTY`.
macro_rules! field {
    ($name:literal, $display:literal, $ty:ident, $default:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::catalog::FieldDef {
            name: $name,
            display_name: $display,
            field_type: $crate::catalog::FieldType::$ty,
            default: $default,
            $($key: $value,)*
            ..$crate::catalog::FieldDef::EMPTY
        }
    };
}

/// Option list: `"Display Name" => "value"` with an optional `: "description"`.
macro_rules! opts {
    ($($name:literal => $value:literal $(: $desc:literal)?),* $(,)?) => {
        &[$($crate::catalog::FieldOption {
            name: $name,
            value: $value,
            description: concat!("" $(, $desc)?),
        }),*]
    };
}

/// Display conditions: `parameter = [value, ...]`.
macro_rules! show {
    ($($param:ident = [$($v:tt),* $(,)?]),* $(,)?) => {
        &[$($crate::catalog::DisplayCondition {
            parameter: stringify!($param),
            values: &[$(show_value!($v)),*],
        }),*]
    };
}

macro_rules! show_value {
    (true) => {
        $crate::catalog::ShowValue::Bool(true)
    };
    (false) => {
        $crate::catalog::ShowValue::Bool(false)
    };
    ($v:literal) => {
        $crate::catalog::ShowValue::Str($v)
    };
}
