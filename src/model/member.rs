//! Sections and members: `sectiondef`, `memberdef`, `member`, `param`,
//! `enumvalue`, `location`.

use super::description::Description;
use super::linked_text::LinkedText;
use crate::error::{Error, Result};
use crate::xml::{Element, XmlParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protection {
    Public,
    Protected,
    Private,
    Package,
}

impl Protection {
    pub fn from_doxygen(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            "package" => Some(Self::Package),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
        }
    }

    pub(crate) fn parse_attribute(element: &Element<'_, '_>) -> Result<Option<Self>> {
        let Some(raw) = element.attribute("prot") else {
            return Ok(None);
        };
        Self::from_doxygen(raw)
            .map(Some)
            .ok_or_else(|| Error::InvalidAttribute {
                element: element.name().to_string(),
                attribute: "prot".to_string(),
                value: raw.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Virtualness {
    #[default]
    NonVirtual,
    Virtual,
    PureVirtual,
}

impl Virtualness {
    pub(crate) fn parse_attribute(element: &Element<'_, '_>) -> Result<Self> {
        match element.attribute("virt") {
            None | Some("non-virtual") => Ok(Self::NonVirtual),
            Some("virtual") => Ok(Self::Virtual),
            Some("pure-virtual") => Ok(Self::PureVirtual),
            Some(other) => Err(Error::InvalidAttribute {
                element: element.name().to_string(),
                attribute: "virt".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Define,
    Property,
    Event,
    Variable,
    Typedef,
    Enum,
    Function,
    Signal,
    Prototype,
    Friend,
    Dcop,
    Slot,
    Interface,
    Service,
}

impl MemberKind {
    pub fn from_doxygen(value: &str) -> Option<Self> {
        let kind = match value {
            "define" => Self::Define,
            "property" => Self::Property,
            "event" => Self::Event,
            "variable" => Self::Variable,
            "typedef" => Self::Typedef,
            "enum" => Self::Enum,
            "function" => Self::Function,
            "signal" => Self::Signal,
            "prototype" => Self::Prototype,
            "friend" => Self::Friend,
            "dcop" => Self::Dcop,
            "slot" => Self::Slot,
            "interface" => Self::Interface,
            "service" => Self::Service,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Define => "define",
            Self::Property => "property",
            Self::Event => "event",
            Self::Variable => "variable",
            Self::Typedef => "typedef",
            Self::Enum => "enum",
            Self::Function => "function",
            Self::Signal => "signal",
            Self::Prototype => "prototype",
            Self::Friend => "friend",
            Self::Dcop => "dcop",
            Self::Slot => "slot",
            Self::Interface => "interface",
            Self::Service => "service",
        }
    }

    pub fn is_callable(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Signal | Self::Slot | Self::Prototype | Self::Dcop
        )
    }
}

/// `DoxSectionKind`: visibility crossed with member category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    UserDefined,
    PublicType,
    PublicFunc,
    PublicAttrib,
    PublicSlot,
    Signal,
    DcopFunc,
    Property,
    Event,
    PublicStaticFunc,
    PublicStaticAttrib,
    ProtectedType,
    ProtectedFunc,
    ProtectedAttrib,
    ProtectedSlot,
    ProtectedStaticFunc,
    ProtectedStaticAttrib,
    PackageType,
    PackageFunc,
    PackageAttrib,
    PackageStaticFunc,
    PackageStaticAttrib,
    PrivateType,
    PrivateFunc,
    PrivateAttrib,
    PrivateSlot,
    PrivateStaticFunc,
    PrivateStaticAttrib,
    Friend,
    Related,
    Define,
    Prototype,
    Typedef,
    Enum,
    Func,
    Var,
}

const SECTION_KINDS: &[(&str, SectionKind, &str)] = &[
    ("user-defined", SectionKind::UserDefined, "Definitions"),
    ("public-type", SectionKind::PublicType, "Public Member Typedefs"),
    ("public-func", SectionKind::PublicFunc, "Public Member Functions"),
    ("public-attrib", SectionKind::PublicAttrib, "Public Member Attributes"),
    ("public-slot", SectionKind::PublicSlot, "Public Slots"),
    ("signal", SectionKind::Signal, "Signals"),
    ("dcop-func", SectionKind::DcopFunc, "DCOP Functions"),
    ("property", SectionKind::Property, "Properties"),
    ("event", SectionKind::Event, "Events"),
    ("public-static-func", SectionKind::PublicStaticFunc, "Public Static Functions"),
    ("public-static-attrib", SectionKind::PublicStaticAttrib, "Public Static Attributes"),
    ("protected-type", SectionKind::ProtectedType, "Protected Member Typedefs"),
    ("protected-func", SectionKind::ProtectedFunc, "Protected Member Functions"),
    ("protected-attrib", SectionKind::ProtectedAttrib, "Protected Member Attributes"),
    ("protected-slot", SectionKind::ProtectedSlot, "Protected Slots"),
    ("protected-static-func", SectionKind::ProtectedStaticFunc, "Protected Static Functions"),
    ("protected-static-attrib", SectionKind::ProtectedStaticAttrib, "Protected Static Attributes"),
    ("package-type", SectionKind::PackageType, "Package Member Typedefs"),
    ("package-func", SectionKind::PackageFunc, "Package Member Functions"),
    ("package-attrib", SectionKind::PackageAttrib, "Package Member Attributes"),
    ("package-static-func", SectionKind::PackageStaticFunc, "Package Static Functions"),
    ("package-static-attrib", SectionKind::PackageStaticAttrib, "Package Static Attributes"),
    ("private-type", SectionKind::PrivateType, "Private Member Typedefs"),
    ("private-func", SectionKind::PrivateFunc, "Private Member Functions"),
    ("private-attrib", SectionKind::PrivateAttrib, "Private Member Attributes"),
    ("private-slot", SectionKind::PrivateSlot, "Private Slots"),
    ("private-static-func", SectionKind::PrivateStaticFunc, "Private Static Functions"),
    ("private-static-attrib", SectionKind::PrivateStaticAttrib, "Private Static Attributes"),
    ("friend", SectionKind::Friend, "Friends"),
    ("related", SectionKind::Related, "Related"),
    ("define", SectionKind::Define, "Macro Definitions"),
    ("prototype", SectionKind::Prototype, "Prototypes"),
    ("typedef", SectionKind::Typedef, "Typedefs"),
    ("enum", SectionKind::Enum, "Enumerations"),
    ("func", SectionKind::Func, "Functions"),
    ("var", SectionKind::Var, "Variables"),
];

impl SectionKind {
    pub fn from_doxygen(value: &str) -> Option<Self> {
        SECTION_KINDS
            .iter()
            .find(|(name, _, _)| *name == value)
            .map(|(_, kind, _)| *kind)
    }

    pub fn as_str(self) -> &'static str {
        SECTION_KINDS
            .iter()
            .find(|(_, kind, _)| *kind == self)
            .map(|(name, _, _)| *name)
            .unwrap_or("user-defined")
    }

    /// Default heading when the section has no explicit `<header>`.
    pub fn title(self) -> &'static str {
        SECTION_KINDS
            .iter()
            .find(|(_, kind, _)| *kind == self)
            .map(|(_, _, title)| *title)
            .unwrap_or("Definitions")
    }

    /// Position in the fixed display order of member sections on a page.
    pub fn order(self) -> usize {
        SECTION_KINDS
            .iter()
            .position(|(_, kind, _)| *kind == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub file: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub decl_file: Option<String>,
    pub decl_line: Option<u32>,
    pub body_file: Option<String>,
    pub body_start: Option<i64>,
    pub body_end: Option<i64>,
}

impl Location {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(
            &element,
            &[
                "file",
                "line",
                "column",
                "declfile",
                "declline",
                "declcolumn",
                "bodyfile",
                "bodystart",
                "bodyend",
            ],
        );
        Ok(Self {
            file: element.attribute_string("file")?,
            line: element.optional_attribute_number("line")?,
            column: element.optional_attribute_number("column")?,
            decl_file: element.attribute("declfile").map(str::to_string),
            decl_line: element.optional_attribute_number("declline")?,
            body_file: element.attribute("bodyfile").map(str::to_string),
            body_start: element.optional_attribute_number("bodystart")?,
            body_end: element.optional_attribute_number("bodyend")?,
        })
    }
}

/// `paramType`, used by function parameters and template parameter lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Param {
    pub attributes: Option<String>,
    pub type_: Option<LinkedText>,
    pub declname: Option<String>,
    pub defname: Option<String>,
    pub array: Option<String>,
    pub defval: Option<LinkedText>,
    pub type_constraint: Option<LinkedText>,
    pub brief: Option<Description>,
}

impl Param {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;

        let mut param = Self::default();
        for child in element.child_elements() {
            match child.name() {
                "attributes" => param.attributes = Some(child.text()),
                "type" => param.type_ = Some(LinkedText::parse(xml, child, "type")?),
                "declname" => param.declname = Some(child.text()),
                "defname" => param.defname = Some(child.text()),
                "array" => param.array = Some(child.text()),
                "defval" => param.defval = Some(LinkedText::parse(xml, child, "defval")?),
                "typeconstraint" => {
                    param.type_constraint = Some(LinkedText::parse(xml, child, "typeconstraint")?)
                }
                "briefdescription" => {
                    param.brief = Some(Description::parse(xml, child, "briefdescription")?)
                }
                _ => xml.unknown_element(&element, &child),
            }
        }
        Ok(param)
    }
}

pub(crate) fn parse_template_params(
    xml: &XmlParser,
    element: Element<'_, '_>,
) -> Result<Vec<Param>> {
    xml.expect_name(&element, "templateparamlist")?;
    element
        .child_elements()
        .filter(|c| c.name() == "param")
        .map(|c| Param::parse(xml, c, "param"))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub id: String,
    pub name: String,
    pub protection: Option<Protection>,
    pub initializer: Option<LinkedText>,
    pub brief: Description,
    pub detailed: Description,
}

impl EnumValue {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["id", "prot"]);

        let mut value = Self {
            id: element.attribute_string("id")?,
            name: String::new(),
            protection: Protection::parse_attribute(&element)?,
            initializer: None,
            brief: Description::default(),
            detailed: Description::default(),
        };
        for child in element.child_elements() {
            match child.name() {
                "name" => value.name = child.text(),
                "initializer" => {
                    value.initializer = Some(LinkedText::parse(xml, child, "initializer")?)
                }
                "briefdescription" => {
                    value.brief = Description::parse(xml, child, "briefdescription")?
                }
                "detaileddescription" => {
                    value.detailed = Description::parse(xml, child, "detaileddescription")?
                }
                _ => xml.unknown_element(&element, &child),
            }
        }
        if value.name.is_empty() {
            return Err(Error::structural(format!("enum value {} has no name", value.id)));
        }
        Ok(value)
    }
}

/// `reimplementType` and other plain references.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub refid: String,
    pub name: String,
}

impl Reference {
    fn parse(element: Element<'_, '_>) -> Result<Self> {
        Ok(Self {
            refid: element.attribute_string("refid")?,
            name: element.text(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDef {
    pub id: String,
    pub kind: MemberKind,
    pub name: String,
    pub qualified_name: Option<String>,
    pub protection: Protection,
    pub is_static: bool,
    pub is_const: bool,
    pub is_constexpr: bool,
    pub is_explicit: bool,
    pub is_inline: bool,
    pub is_noexcept: bool,
    pub is_mutable: bool,
    pub is_volatile: bool,
    pub is_strong: bool,
    pub is_final: bool,
    pub is_nodiscard: bool,
    pub is_consteval: bool,
    pub is_constinit: bool,
    pub virtualness: Virtualness,
    pub refqual: Option<String>,
    pub template_params: Option<Vec<Param>>,
    pub type_: LinkedText,
    pub definition: Option<String>,
    pub args: Option<String>,
    pub bitfield: Option<String>,
    pub params: Vec<Param>,
    pub enum_values: Vec<EnumValue>,
    pub initializer: Option<LinkedText>,
    pub exceptions: Option<LinkedText>,
    pub reimplements: Vec<Reference>,
    pub reimplemented_by: Vec<Reference>,
    pub brief: Description,
    pub detailed: Description,
    pub in_body: Description,
    pub location: Location,
}

/// Attributes read by [`MemberDef::parse`]. Anything else on a
/// `memberdef` (C#, IDL and Objective-C flags) is reported.
const MEMBERDEF_ATTRIBUTES: &[&str] = &[
    "kind",
    "id",
    "prot",
    "static",
    "strong",
    "const",
    "explicit",
    "inline",
    "refqual",
    "virt",
    "volatile",
    "mutable",
    "noexcept",
    "constexpr",
    "consteval",
    "constinit",
    "nodiscard",
    "final",
];

impl MemberDef {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, MEMBERDEF_ATTRIBUTES);

        let id = element.attribute_string("id")?;
        let raw_kind = element.attribute_string("kind")?;
        let kind = MemberKind::from_doxygen(&raw_kind).ok_or_else(|| Error::InvalidAttribute {
            element: name.to_string(),
            attribute: "kind".to_string(),
            value: raw_kind.clone(),
        })?;
        let protection = Protection::parse_attribute(&element)?.ok_or_else(|| {
            Error::MissingAttribute {
                element: name.to_string(),
                attribute: "prot".to_string(),
            }
        })?;

        let mut member = Self {
            id,
            kind,
            name: String::new(),
            qualified_name: None,
            protection,
            is_static: element.flag("static")?,
            is_const: element.flag("const")?,
            is_constexpr: element.flag("constexpr")?,
            is_explicit: element.flag("explicit")?,
            is_inline: element.flag("inline")?,
            is_noexcept: element.flag("noexcept")?,
            is_mutable: element.flag("mutable")?,
            is_volatile: element.flag("volatile")?,
            is_strong: element.flag("strong")?,
            is_final: element.flag("final")?,
            is_nodiscard: element.flag("nodiscard")?,
            is_consteval: element.flag("consteval")?,
            is_constinit: element.flag("constinit")?,
            virtualness: Virtualness::parse_attribute(&element)?,
            refqual: element.attribute("refqual").map(str::to_string),
            template_params: None,
            type_: LinkedText::default(),
            definition: None,
            args: None,
            bitfield: None,
            params: Vec::new(),
            enum_values: Vec::new(),
            initializer: None,
            exceptions: None,
            reimplements: Vec::new(),
            reimplemented_by: Vec::new(),
            brief: Description::default(),
            detailed: Description::default(),
            in_body: Description::default(),
            location: Location::default(),
        };
        let mut location = None;

        for child in element.child_elements() {
            match child.name() {
                "name" => member.name = child.text(),
                "qualifiedname" => member.qualified_name = Some(child.text()),
                "templateparamlist" => {
                    member.template_params = Some(parse_template_params(xml, child)?)
                }
                "type" => member.type_ = LinkedText::parse(xml, child, "type")?,
                "definition" => member.definition = Some(child.text()),
                "argsstring" => member.args = Some(child.text()),
                "bitfield" => member.bitfield = Some(child.text()),
                "param" => member.params.push(Param::parse(xml, child, "param")?),
                "enumvalue" => member
                    .enum_values
                    .push(EnumValue::parse(xml, child, "enumvalue")?),
                "initializer" => {
                    member.initializer = Some(LinkedText::parse(xml, child, "initializer")?)
                }
                "exceptions" => {
                    member.exceptions = Some(LinkedText::parse(xml, child, "exceptions")?)
                }
                "reimplements" => member.reimplements.push(Reference::parse(child)?),
                "reimplementedby" => member.reimplemented_by.push(Reference::parse(child)?),
                "briefdescription" => {
                    member.brief = Description::parse(xml, child, "briefdescription")?
                }
                "detaileddescription" => {
                    member.detailed = Description::parse(xml, child, "detaileddescription")?
                }
                "inbodydescription" => {
                    member.in_body = Description::parse(xml, child, "inbodydescription")?
                }
                "location" => location = Some(Location::parse(xml, child, "location")?),
                // Call graphs and accessor names are not rendered.
                "references" | "referencedby" | "read" | "write" | "qualifier"
                | "requiresclause" => {}
                _ => xml.unknown_element(&element, &child),
            }
        }

        if member.name.is_empty() {
            return Err(Error::structural(format!("memberdef {} has no name", member.id)));
        }
        member.location = location.ok_or_else(|| Error::MissingElement {
            element: format!("memberdef {}", member.id),
            child: "location".to_string(),
        })?;
        Ok(member)
    }
}

/// A `<member>` entry: a member listed here but defined elsewhere. The kind
/// is absent in `listofallmembers` and back-filled after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRef {
    pub refid: String,
    pub kind: Option<MemberKind>,
    pub name: String,
    pub protection: Option<Protection>,
    pub virtualness: Virtualness,
    pub scope: Option<String>,
}

impl MemberRef {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["refid", "kind", "prot", "virt", "ambiguityscope"]);

        let kind = match element.attribute("kind") {
            Some(raw) => match MemberKind::from_doxygen(raw) {
                Some(kind) => Some(kind),
                None => {
                    xml.unknown_value(&element, "kind", raw);
                    None
                }
            },
            None => None,
        };
        let member = Self {
            refid: element.attribute_string("refid")?,
            kind,
            name: element.inner_text("name")?,
            protection: Protection::parse_attribute(&element)?,
            virtualness: Virtualness::parse_attribute(&element)?,
            scope: element.first_inner_element("scope").map(|s| s.text()),
        };
        Ok(member)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionMember {
    Definition(MemberDef),
    Reference(MemberRef),
}

impl SectionMember {
    pub fn id(&self) -> &str {
        match self {
            Self::Definition(def) => &def.id,
            Self::Reference(reference) => &reference.refid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Definition(def) => &def.name,
            Self::Reference(reference) => &reference.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionDef {
    pub kind: SectionKind,
    pub header: Option<String>,
    pub description: Option<Description>,
    pub members: Vec<SectionMember>,
}

impl SectionDef {
    pub fn parse(xml: &XmlParser, element: Element<'_, '_>, name: &str) -> Result<Self> {
        xml.expect_name(&element, name)?;
        xml.check_attributes(&element, &["kind"]);

        let raw_kind = element.attribute_string("kind")?;
        if raw_kind.is_empty() {
            return Err(Error::structural("sectiondef with an empty kind"));
        }
        let kind = SectionKind::from_doxygen(&raw_kind).ok_or_else(|| Error::InvalidAttribute {
            element: name.to_string(),
            attribute: "kind".to_string(),
            value: raw_kind.clone(),
        })?;

        let mut section = Self {
            kind,
            header: None,
            description: None,
            members: Vec::new(),
        };
        for child in element.child_elements() {
            match child.name() {
                "header" => section.header = Some(child.text()),
                "description" => {
                    section.description = Some(Description::parse(xml, child, "description")?)
                }
                "memberdef" => section.members.push(SectionMember::Definition(
                    MemberDef::parse(xml, child, "memberdef")?,
                )),
                "member" => section.members.push(SectionMember::Reference(MemberRef::parse(
                    xml, child, "member",
                )?)),
                _ => xml.unknown_element(&element, &child),
            }
        }
        Ok(section)
    }

    /// Heading shown on the page.
    pub fn title(&self) -> String {
        match &self.header {
            Some(header) if !header.trim().is_empty() => header.trim().to_string(),
            _ => self.kind.title().to_string(),
        }
    }

    pub fn definitions(&self) -> impl Iterator<Item = &MemberDef> {
        self.members.iter().filter_map(|m| match m {
            SectionMember::Definition(def) => Some(def),
            SectionMember::Reference(_) => None,
        })
    }
}
