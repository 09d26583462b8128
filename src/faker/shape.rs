//! Closed view of an output type reference, used by the resolver compiler.

use apollo_compiler::schema::{
    DirectiveList, EnumType, ExtendedType, InterfaceType, ObjectType, ScalarType, Type, UnionType,
};
use apollo_compiler::validation::Valid;
use apollo_compiler::{Name, Node, Schema};

use crate::error::{FakerError, FakerResult};

/// A named leaf type: resolution stops here
#[derive(Debug, Clone, Copy)]
pub enum LeafType<'a> {
    Scalar(&'a Node<ScalarType>),
    Enum(&'a Node<EnumType>),
}

impl<'a> LeafType<'a> {
    pub fn name(&self) -> &'a Name {
        match self {
            LeafType::Scalar(scalar) => &scalar.name,
            LeafType::Enum(enum_type) => &enum_type.name,
        }
    }

    pub fn directives(&self) -> &'a DirectiveList {
        match self {
            LeafType::Scalar(scalar) => &scalar.directives,
            LeafType::Enum(enum_type) => &enum_type.directives,
        }
    }
}

/// An interface or union type
#[derive(Debug, Clone, Copy)]
pub enum AbstractType<'a> {
    Interface(&'a Node<InterfaceType>),
    Union(&'a Node<UnionType>),
}

impl<'a> AbstractType<'a> {
    pub fn name(&self) -> &'a Name {
        match self {
            AbstractType::Interface(interface) => &interface.name,
            AbstractType::Union(union_type) => &union_type.name,
        }
    }

    pub fn directives(&self) -> &'a DirectiveList {
        match self {
            AbstractType::Interface(interface) => &interface.directives,
            AbstractType::Union(union_type) => &union_type.directives,
        }
    }
}

/// The shape of an output type: wrappers peeled one layer at a time
#[derive(Debug, Clone)]
pub enum TypeShape<'a> {
    NonNull(Box<TypeShape<'a>>),
    List(Box<TypeShape<'a>>),
    Abstract(AbstractType<'a>),
    Leaf(LeafType<'a>),
    Object(&'a Node<ObjectType>),
}

impl<'a> TypeShape<'a> {
    pub fn of(schema: &'a Valid<Schema>, ty: &'a Type) -> FakerResult<Self> {
        Ok(match ty {
            Type::Named(name) => Self::named(schema, name)?,
            Type::NonNullNamed(name) => TypeShape::NonNull(Box::new(Self::named(schema, name)?)),
            Type::List(inner) => TypeShape::List(Box::new(Self::of(schema, inner)?)),
            Type::NonNullList(inner) => {
                TypeShape::NonNull(Box::new(TypeShape::List(Box::new(Self::of(schema, inner)?))))
            }
        })
    }

    fn named(schema: &'a Valid<Schema>, name: &'a Name) -> FakerResult<Self> {
        let ty = schema
            .types
            .get(name)
            .ok_or_else(|| FakerError::UnknownType(name.to_string()))?;
        Ok(match ty {
            ExtendedType::Scalar(scalar) => TypeShape::Leaf(LeafType::Scalar(scalar)),
            ExtendedType::Enum(enum_type) => TypeShape::Leaf(LeafType::Enum(enum_type)),
            ExtendedType::Object(object) => TypeShape::Object(object),
            ExtendedType::Interface(interface) => {
                TypeShape::Abstract(AbstractType::Interface(interface))
            }
            ExtendedType::Union(union_type) => TypeShape::Abstract(AbstractType::Union(union_type)),
            ExtendedType::InputObject(_) => {
                return Err(FakerError::InputTypeAsOutput(name.to_string()))
            }
        })
    }

    /// Directives declared on the named type at the bottom of the wrappers
    pub fn named_directives(&self) -> &'a DirectiveList {
        match self {
            TypeShape::NonNull(inner) | TypeShape::List(inner) => inner.named_directives(),
            TypeShape::Abstract(abstract_type) => abstract_type.directives(),
            TypeShape::Leaf(leaf) => leaf.directives(),
            TypeShape::Object(object) => &object.directives,
        }
    }
}
