use std::collections::HashSet;

use crate::{
    contract::{Contract, Dispatch, Member},
    error::{DoubleError, Result},
};

/// Checks that a contract can be represented by a test double
pub struct ContractValidator;

impl ContractValidator {
    /// Validate every member of a contract
    ///
    /// A contract is supported when:
    /// - Every member name is an identifier
    /// - No member is sealed
    /// - Property names are unique and do not collide with method names
    /// - No two method overloads share both name and arity
    ///
    /// # Returns
    /// * `Ok(())` - If a double can implement the contract
    /// * `Err(DoubleError::UnsupportedContract)` - For the first offending member
    pub fn validate_contract(contract: &Contract) -> Result<()> {
        let mut property_names = HashSet::new();
        let mut method_keys = HashSet::new();

        for member in contract.members() {
            Self::validate_member_name(contract, member.name())?;

            if member.dispatch() == Dispatch::Sealed {
                return Err(DoubleError::unsupported(
                    contract.name(),
                    member.name(),
                    "is sealed and cannot be overridden",
                ));
            }

            match member {
                Member::Property(prop) => {
                    if !property_names.insert(prop.name.as_str()) {
                        return Err(DoubleError::unsupported(
                            contract.name(),
                            &prop.name,
                            "is declared more than once",
                        ));
                    }
                    if contract.methods().any(|m| m.name == prop.name) {
                        return Err(DoubleError::unsupported(
                            contract.name(),
                            &prop.name,
                            "is both a property and a method",
                        ));
                    }
                }
                Member::Method(method) => {
                    if !method_keys.insert((method.name.as_str(), method.arity())) {
                        return Err(DoubleError::unsupported(
                            contract.name(),
                            &method.name,
                            format!("has ambiguous overloads with {} parameter(s)", method.arity()),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Validate a member name
    ///
    /// Member names must start with a letter or underscore and contain only
    /// letters, digits and underscores.
    pub fn validate_member_name(contract: &Contract, name: &str) -> Result<()> {
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_start || !valid_rest {
            return Err(DoubleError::unsupported(
                contract.name(),
                name,
                "is not a valid identifier",
            ));
        }

        Ok(())
    }
}
