use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::ValueType;

/// Structural description of an interface that a test double implements.
///
/// A contract is a named set of methods and properties. The engine never
/// inspects Rust traits directly; adapters describe the trait they double
/// with a `Contract` and delegate each member to the double.
///
/// # Examples
///
/// ```rust
/// use standin_core::contract::ContractBuilder;
/// use standin_core::value::ValueType;
///
/// let contract = ContractBuilder::new("Calculator")
///     .method("Sum", &[("a", ValueType::Int), ("b", ValueType::Int)], ValueType::Int)
///     .build();
///
/// assert_eq!(contract.name(), "Calculator");
/// assert!(contract.method("Sum", 2).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    name: String,
    members: Vec<Member>,
}

/// A single member of a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Method(MethodSignature),
    Property(PropertySignature),
}

/// Whether a member can be replaced by a double
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dispatch {
    /// Abstract or overridable; the double can intercept it
    Overridable,
    /// Concrete and non-overridable; doubles cannot substitute it
    Sealed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: ValueType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: ValueType,
    /// Member returns an asynchronous result of `returns`
    pub asynchronous: bool,
    pub dispatch: Dispatch,
}

/// Which accessors a property exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyAccess {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl PropertyAccess {
    pub fn can_read(self) -> bool {
        matches!(self, PropertyAccess::ReadOnly | PropertyAccess::ReadWrite)
    }

    pub fn can_write(self) -> bool {
        matches!(self, PropertyAccess::WriteOnly | PropertyAccess::ReadWrite)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySignature {
    pub name: String,
    pub ty: ValueType,
    pub access: PropertyAccess,
    pub dispatch: Dispatch,
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Property(p) => &p.name,
        }
    }

    pub fn dispatch(&self) -> Dispatch {
        match self {
            Member::Method(m) => m.dispatch,
            Member::Property(p) => p.dispatch,
        }
    }
}

impl MethodSignature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        if self.asynchronous {
            write!(f, ") -> async {}", self.returns)
        } else {
            write!(f, ") -> {}", self.returns)
        }
    }
}

impl fmt::Display for PropertySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accessors = match self.access {
            PropertyAccess::ReadOnly => "get",
            PropertyAccess::WriteOnly => "set",
            PropertyAccess::ReadWrite => "get; set",
        };
        write!(f, "{}: {} {{ {} }}", self.name, self.ty, accessors)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Method(m) => m.fmt(f),
            Member::Property(p) => p.fmt(f),
        }
    }
}

impl Contract {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(sig) => Some(sig),
            Member::Property(_) => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertySignature> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(sig) => Some(sig),
            Member::Method(_) => None,
        })
    }

    /// Find a method by name and arity
    pub fn method(&self, name: &str, arity: usize) -> Option<&MethodSignature> {
        self.methods()
            .find(|m| m.name == name && m.arity() == arity)
    }

    /// All overloads sharing a method name
    pub fn overloads<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a MethodSignature> + 'n
    where
        'a: 'n,
    {
        self.methods().filter(move |m| m.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertySignature> {
        self.properties().find(|p| p.name == name)
    }

    /// Check whether any member carries this name
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name() == name)
    }
}

/// Fluent builder for [`Contract`]s
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    contract: Contract,
}

impl ContractBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            contract: Contract {
                name: name.into(),
                members: Vec::new(),
            },
        }
    }

    /// Add an overridable synchronous method
    pub fn method(self, name: impl Into<String>, params: &[(&str, ValueType)], returns: ValueType) -> Self {
        self.push_method(name.into(), params, returns, false, Dispatch::Overridable)
    }

    /// Add an overridable method returning an asynchronous result
    pub fn async_method(
        self,
        name: impl Into<String>,
        params: &[(&str, ValueType)],
        returns: ValueType,
    ) -> Self {
        self.push_method(name.into(), params, returns, true, Dispatch::Overridable)
    }

    /// Add a concrete method that cannot be intercepted
    pub fn sealed_method(
        self,
        name: impl Into<String>,
        params: &[(&str, ValueType)],
        returns: ValueType,
    ) -> Self {
        self.push_method(name.into(), params, returns, false, Dispatch::Sealed)
    }

    /// Add a read-write property
    pub fn property(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.push_property(name.into(), ty, PropertyAccess::ReadWrite, Dispatch::Overridable)
    }

    pub fn read_only_property(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.push_property(name.into(), ty, PropertyAccess::ReadOnly, Dispatch::Overridable)
    }

    pub fn write_only_property(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.push_property(name.into(), ty, PropertyAccess::WriteOnly, Dispatch::Overridable)
    }

    pub fn sealed_property(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.push_property(name.into(), ty, PropertyAccess::ReadWrite, Dispatch::Sealed)
    }

    /// Add a pre-built member
    pub fn member(mut self, member: Member) -> Self {
        self.contract.members.push(member);
        self
    }

    pub fn build(self) -> Contract {
        self.contract
    }

    fn push_method(
        self,
        name: String,
        params: &[(&str, ValueType)],
        returns: ValueType,
        asynchronous: bool,
        dispatch: Dispatch,
    ) -> Self {
        let params = params
            .iter()
            .map(|(name, ty)| Param {
                name: (*name).to_string(),
                ty: ty.clone(),
            })
            .collect();
        self.member(Member::Method(MethodSignature {
            name,
            params,
            returns,
            asynchronous,
            dispatch,
        }))
    }

    fn push_property(self, name: String, ty: ValueType, access: PropertyAccess, dispatch: Dispatch) -> Self {
        self.member(Member::Property(PropertySignature {
            name,
            ty,
            access,
            dispatch,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> Contract {
        ContractBuilder::new("Foo")
            .property("Name", ValueType::Str)
            .read_only_property("Count", ValueType::Int)
            .method("DoSomething", &[("value", ValueType::Str)], ValueType::Bool)
            .method(
                "DoSomething",
                &[("number", ValueType::Int), ("value", ValueType::Str)],
                ValueType::Bool,
            )
            .async_method("DoSomethingAsync", &[], ValueType::Bool)
            .build()
    }

    #[test]
    fn test_lookup_by_name_and_arity() {
        let contract = foo();
        assert_eq!(contract.method("DoSomething", 1).unwrap().params[0].ty, ValueType::Str);
        assert_eq!(contract.method("DoSomething", 2).unwrap().params[0].ty, ValueType::Int);
        assert!(contract.method("DoSomething", 3).is_none());
        assert_eq!(contract.overloads("DoSomething").count(), 2);
        assert!(contract.property("Name").is_some());
        assert!(contract.property("DoSomething").is_none());
        assert!(contract.has_member("Count"));
        assert!(!contract.has_member("Missing"));
    }

    #[test]
    fn test_overloads_outlive_the_lookup_name() {
        let contract = foo();
        let overloads: Vec<&MethodSignature> = {
            let name = String::from("DoSomething");
            contract.overloads(&name).collect()
        };
        assert_eq!(overloads.iter().map(|m| m.arity()).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_signature_display() {
        let contract = foo();
        assert_eq!(
            contract.method("DoSomething", 2).unwrap().to_string(),
            "DoSomething(number: int, value: str) -> bool"
        );
        assert_eq!(
            contract.method("DoSomethingAsync", 0).unwrap().to_string(),
            "DoSomethingAsync() -> async bool"
        );
        assert_eq!(
            contract.property("Count").unwrap().to_string(),
            "Count: int { get }"
        );
    }

    #[test]
    fn test_property_access() {
        assert!(PropertyAccess::ReadWrite.can_read());
        assert!(PropertyAccess::ReadWrite.can_write());
        assert!(!PropertyAccess::ReadOnly.can_write());
        assert!(!PropertyAccess::WriteOnly.can_read());
    }
}
