//! TypeScript type expressions produced by the resolver passes.
//!
//! - TsType: the expression tree (primitives, literals, arrays, objects, ...)
//! - TsObject: an object literal with an optional index signature
//! - TsProp: one property of an object literal

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, any
    Primitive(TsPrimitive),
    /// Quoted literal type: 'active'
    Literal(String),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object literal: { foo: string; bar?: number; [key: string]: any }
    Object(TsObject),
    /// Lookup into the generated container: definitions['Pet']
    Ref {
        /// Name of the exported interface.
        container: String,
        /// Definition key.
        name: String,
    },
    /// Target-language text supplied from outside the pipeline, emitted as is
    Raw(String),
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`, for both `integer` and `number`
    Number,
    /// `boolean`
    Boolean,
    /// `any`
    Any,
}

/// Object literal body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsObject {
    /// Properties in declaration order.
    pub props: Vec<TsProp>,
    /// Value type of the trailing `[key: string]: T` signature, if any.
    pub index: Option<Box<TsType>>,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property name, quoted on output when it is not an identifier.
    pub name: String,
    /// Property type.
    pub ty: TsType,
    /// Rendered with a `?` marker.
    pub optional: bool,
    /// Description rendered as a `/** ... */` comment.
    pub doc: Option<String>,
}

impl TsType {
    /// The unconstrained value type.
    pub const fn any() -> Self {
        TsType::Primitive(TsPrimitive::Any)
    }

    /// `{ [key: string]: any }`
    pub fn open_dictionary() -> Self {
        TsType::Object(TsObject {
            props: Vec::new(),
            index: Some(Box::new(TsType::any())),
        })
    }

    /// Intersection of `members`, collapsing the trivial cases.
    pub fn intersection(mut members: Vec<TsType>) -> Self {
        match members.len() {
            0 => TsType::open_dictionary(),
            1 => members.remove(0),
            _ => TsType::Intersection(members),
        }
    }

    /// Union of `members`, collapsing the single-member case.
    pub fn union(mut members: Vec<TsType>) -> Self {
        if members.len() == 1 {
            members.remove(0)
        } else {
            TsType::Union(members)
        }
    }

    /// The primitive keyword, if this is one.
    pub const fn as_primitive(&self) -> Option<TsPrimitive> {
        match self {
            TsType::Primitive(p) => Some(*p),
            _ => None,
        }
    }
}

impl TsObject {
    /// True when the literal has neither properties nor an index signature.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.index.is_none()
    }
}
