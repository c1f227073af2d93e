//! Classification of native types against the primitive set and the
//! configured mapping tables.

use strand_ctype::CType;

use crate::config::BindingConfig;
use crate::target::TargetType;

/// Native scalar types with a fixed target mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    Int,
    /// `size_t`, marshalled as a pointer-width unsigned integer.
    Size,
}

impl Primitive {
    pub fn from_native(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Primitive::Bool),
            "int" => Some(Primitive::Int),
            "size_t" => Some(Primitive::Size),
            _ => None,
        }
    }

    pub fn target_type(self) -> TargetType {
        match self {
            Primitive::Bool => TargetType::bool(),
            Primitive::Int => TargetType::int(),
            Primitive::Size => TargetType::uint_ptr(),
        }
    }
}

/// Templates of the types that can carry a buffer length.
pub fn length_templates() -> [CType; 2] {
    [CType::named("int"), CType::named("size_t")]
}

/// Converts native types into target types using a [`BindingConfig`].
///
/// Every method answers `None`/`false` when the type is outside its
/// category or when a mapping table lacks the entry, so rules can fall
/// through to the next candidate.
#[derive(Clone, Copy, Debug)]
pub struct TypeConverter<'a> {
    config: &'a BindingConfig,
}

impl<'a> TypeConverter<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self { config }
    }

    /// Primitive or enum-mapped `Named` type.
    pub fn scalar(&self, ty: &CType) -> Option<TargetType> {
        let name = ty.as_named()?;
        if let Some(primitive) = Primitive::from_native(name) {
            return Some(primitive.target_type());
        }
        self.config.enum_name(name).map(TargetType::new)
    }

    /// Scalar that may be passed by reference: `bool`, `int`, or a mapped enum.
    pub fn reference_scalar(&self, ty: &CType) -> Option<TargetType> {
        let name = ty.as_named()?;
        match Primitive::from_native(name) {
            Some(Primitive::Size) => None,
            Some(primitive) => Some(primitive.target_type()),
            None => self.config.enum_name(name).map(TargetType::new),
        }
    }

    /// Wrapper class for a `Pointer(Named(h))` with `h` handle-mapped.
    pub fn handle_class(&self, ty: &CType) -> Option<&'a str> {
        self.config.handle_class(ty.pointee_name()?)
    }

    /// `Named(error_type)`.
    pub fn is_status_code(&self, ty: &CType) -> bool {
        ty.as_named() == Some(self.config.error_type.as_str())
    }

    pub fn is_c_string(ty: &CType) -> bool {
        ty.pointee_name() == Some("char")
    }

    pub fn is_void(ty: &CType) -> bool {
        ty.as_named() == Some("void")
    }

    pub fn config(&self) -> &'a BindingConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BindingConfig {
        BindingConfig::new("libspotify")
            .with_enum("sp_error", "SpotifyError")
            .with_enum("sp_linktype", "LinkType")
            .with_handle("sp_track", "Track")
    }

    #[test]
    fn scalars_map_primitives_and_enums() {
        let config = config();
        let types = TypeConverter::new(&config);
        assert_eq!(types.scalar(&CType::named("int")), Some(TargetType::int()));
        assert_eq!(types.scalar(&CType::named("bool")), Some(TargetType::bool()));
        assert_eq!(
            types.scalar(&CType::named("size_t")),
            Some(TargetType::uint_ptr())
        );
        assert_eq!(
            types.scalar(&CType::named("sp_linktype")),
            Some(TargetType::new("LinkType"))
        );
        assert_eq!(types.scalar(&CType::named("sp_unknown")), None);
        assert_eq!(types.scalar(&CType::pointer_to("int")), None);
    }

    #[test]
    fn size_is_not_passed_by_reference() {
        let config = config();
        let types = TypeConverter::new(&config);
        assert_eq!(types.reference_scalar(&CType::named("size_t")), None);
        assert_eq!(
            types.reference_scalar(&CType::named("int")),
            Some(TargetType::int())
        );
    }

    #[test]
    fn handles_need_a_mapping() {
        let config = config();
        let types = TypeConverter::new(&config);
        assert_eq!(types.handle_class(&CType::pointer_to("sp_track")), Some("Track"));
        assert_eq!(types.handle_class(&CType::pointer_to("FILE")), None);
        assert_eq!(types.handle_class(&CType::named("sp_track")), None);
    }

    #[test]
    fn status_code_uses_configured_type() {
        let config = config();
        let types = TypeConverter::new(&config);
        assert!(types.is_status_code(&CType::named("sp_error")));
        assert!(!types.is_status_code(&CType::named("int")));
    }
}
