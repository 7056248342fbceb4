//! Coded fields of a tool table line.

/// Value kind of a coded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned integer written without sign or decimals.
    Integer,
    /// Real written with an explicit sign and fixed decimals.
    Real,
}

/// A letter-coded field of a tool table line.
///
/// [`Field::ALL`] lists the fields in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ToolNumber,
    Pocket,
    Diameter,
    XOffset,
    YOffset,
    ZOffset,
    AAngle,
    BAngle,
    CAngle,
    UOffset,
    VOffset,
    WOffset,
    Orientation,
    FrontAngle,
    BackAngle,
}

impl Field {
    /// All fields in canonical output order.
    pub const ALL: [Field; 15] = [
        Field::ToolNumber,
        Field::Pocket,
        Field::Diameter,
        Field::XOffset,
        Field::YOffset,
        Field::ZOffset,
        Field::AAngle,
        Field::BAngle,
        Field::CAngle,
        Field::UOffset,
        Field::VOffset,
        Field::WOffset,
        Field::Orientation,
        Field::FrontAngle,
        Field::BackAngle,
    ];

    /// Letter code introducing the field.
    pub fn code(&self) -> char {
        match self {
            Field::ToolNumber => 'T',
            Field::Pocket => 'P',
            Field::Diameter => 'D',
            Field::XOffset => 'X',
            Field::YOffset => 'Y',
            Field::ZOffset => 'Z',
            Field::AAngle => 'A',
            Field::BAngle => 'B',
            Field::CAngle => 'C',
            Field::UOffset => 'U',
            Field::VOffset => 'V',
            Field::WOffset => 'W',
            Field::Orientation => 'Q',
            Field::FrontAngle => 'I',
            Field::BackAngle => 'J',
        }
    }

    /// Look up a field by its letter code.
    pub fn from_code(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.code() == c)
    }

    /// Field name as used in preset passthrough data.
    pub fn name(&self) -> &'static str {
        match self {
            Field::ToolNumber => "tool_number",
            Field::Pocket => "pocket",
            Field::Diameter => "diameter",
            Field::XOffset => "x_offset",
            Field::YOffset => "y_offset",
            Field::ZOffset => "z_offset",
            Field::AAngle => "a_angle",
            Field::BAngle => "b_angle",
            Field::CAngle => "c_angle",
            Field::UOffset => "u_offset",
            Field::VOffset => "v_offset",
            Field::WOffset => "w_offset",
            Field::Orientation => "orientation",
            Field::FrontAngle => "front_angle",
            Field::BackAngle => "back_angle",
        }
    }

    /// Look up a field by its passthrough name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::ToolNumber | Field::Pocket | Field::Orientation => FieldKind::Integer,
            _ => FieldKind::Real,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
