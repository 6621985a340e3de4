//! The test double: a dispatch table over a contract
//!
//! A `TestDouble` stands in for one contract during one test. Members are
//! resolved against the contract, every interaction is appended to the
//! invocation log, and verification queries read that log afterward.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::future::{ready, Ready};
use tracing::{debug, trace, warn};

use crate::{
    behavior::{Behavior, PropertyMode},
    contract::{Contract, MethodSignature, PropertySignature},
    error::{DoubleError, Result},
    invocation::{AccessKind, Invocation, InvocationLog},
    matcher::{ArgMatcher, CallMatcher},
    settings::{DoubleSettings, Strictness},
    times::Times,
    validation::ContractValidator,
    value::{FromValue, Value, ValueType},
    verification::VerificationFailure,
};

/// Method identity inside a contract: name and arity
type MethodKey = (String, usize);

#[derive(Clone)]
struct MethodSetup {
    matcher: CallMatcher,
    description: String,
    behavior: Behavior,
    verifiable: bool,
}

#[derive(Default)]
struct PropertySlot {
    mode: Option<PropertyMode>,
    value: Option<Value>,
}

struct SetterExpectation {
    property: String,
    matcher: ArgMatcher,
}

#[derive(Default)]
struct DoubleState {
    setups: HashMap<MethodKey, Vec<MethodSetup>>,
    properties: HashMap<String, PropertySlot>,
    setter_expectations: Vec<SetterExpectation>,
    log: InvocationLog,
}

/// Substitute implementation of a [`Contract`]
///
/// # Examples
///
/// ```rust
/// use standin_core::prelude::*;
///
/// let contract = ContractBuilder::new("Calculator")
///     .method("Sum", &[("a", ValueType::Int), ("b", ValueType::Int)], ValueType::Int)
///     .build();
/// let double = TestDouble::new(contract).unwrap();
///
/// // A double never runs real logic
/// let sum: i64 = double.call("Sum", vec![10.into(), 20.into()]).unwrap();
/// assert_eq!(sum, 0);
///
/// double.verify("Sum", CallMatcher::AnyArgs, Times::once()).unwrap();
/// ```
pub struct TestDouble {
    contract: Contract,
    settings: DoubleSettings,
    state: Mutex<DoubleState>,
}

impl fmt::Debug for TestDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDouble")
            .field("contract", &self.contract.name())
            .field("settings", &self.settings)
            .field("invocations", &self.invocation_count())
            .finish()
    }
}

impl TestDouble {
    /// Create a loose double implementing every member of `contract`
    pub fn new(contract: Contract) -> Result<Self> {
        Self::with_settings(contract, DoubleSettings::default())
    }

    /// Create a double that rejects unconfigured method calls
    pub fn strict(contract: Contract) -> Result<Self> {
        Self::with_settings(contract, DoubleSettings::strict())
    }

    pub fn with_settings(contract: Contract, settings: DoubleSettings) -> Result<Self> {
        ContractValidator::validate_contract(&contract)?;
        debug!(
            contract = %contract.name(),
            members = contract.members().len(),
            strictness = ?settings.strictness,
            "Created test double"
        );
        Ok(Self {
            contract,
            settings,
            state: Mutex::new(DoubleState::default()),
        })
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn settings(&self) -> &DoubleSettings {
        &self.settings
    }

    // ---- configuration ----

    /// Install a behaviour for calls to `name` matching `matcher`
    ///
    /// A matcher with the same description replaces the earlier configuration.
    /// `CallMatcher::AnyArgs` applies to every overload of `name`.
    pub fn configure_method(
        &self,
        name: &str,
        matcher: impl Into<CallMatcher>,
        behavior: Behavior,
    ) -> Result<()> {
        self.install_setup(name, matcher.into(), behavior, false)
    }

    /// Like [`configure_method`](Self::configure_method), and require a
    /// matching call before [`verify_all`](Self::verify_all) passes
    pub fn expect_method(
        &self,
        name: &str,
        matcher: impl Into<CallMatcher>,
        behavior: Behavior,
    ) -> Result<()> {
        self.install_setup(name, matcher.into(), behavior, true)
    }

    /// Configure how a property answers reads
    ///
    /// Any value tracked so far is discarded.
    pub fn configure_property(&self, name: &str, mode: PropertyMode) -> Result<()> {
        let property = self.property(name)?;
        if let Some(initial) = mode.initial_value() {
            self.check_type(name, &property.ty, initial)?;
        }

        debug!(contract = %self.contract.name(), property = name, mode = ?mode, "Configured property");
        let slot = PropertySlot {
            value: mode.initial_value().cloned(),
            mode: Some(mode),
        };
        self.state.lock().properties.insert(name.to_string(), slot);
        Ok(())
    }

    /// Expect the property to be set to a matching value before
    /// [`verify_all_configured_setters_called`](Self::verify_all_configured_setters_called)
    pub fn expect_set(&self, name: &str, matcher: ArgMatcher) -> Result<()> {
        let property = self.property(name)?;
        if !property.access.can_write() {
            return Err(self.invalid_access(name, AccessKind::Set));
        }

        debug!(contract = %self.contract.name(), property = name, matcher = %matcher, "Expecting property set");
        self.state.lock().setter_expectations.push(SetterExpectation {
            property: name.to_string(),
            matcher,
        });
        Ok(())
    }

    // ---- exercising ----

    /// Dispatch a method call through the double
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        let signature = self
            .contract
            .method(name, args.len())
            .ok_or_else(|| self.unknown_member(name))?;
        for (param, arg) in signature.params.iter().zip(&args) {
            self.check_type(&format!("{name}({})", param.name), &param.ty, arg)?;
        }

        let candidates = {
            let mut state = self.state.lock();
            self.record(&mut state, name, AccessKind::Call, args.clone());
            state
                .setups
                .get(&(name.to_string(), args.len()))
                .cloned()
                .unwrap_or_default()
        };

        // Most recent configuration wins
        let behavior = candidates
            .into_iter()
            .rev()
            .find(|setup| setup.matcher.matches(&args))
            .map(|setup| setup.behavior);

        match behavior {
            Some(behavior) => self.apply(signature, behavior, &args),
            None if self.settings.strictness == Strictness::Strict => {
                warn!(contract = %self.contract.name(), method = name, "Unconfigured call on strict double");
                Err(DoubleError::UnconfiguredInvocation {
                    member: self.qualified(name),
                })
            }
            None => Ok(signature.returns.default_value()),
        }
    }

    /// Dispatch a call and resolve it as an already-completed future
    pub fn invoke_async(&self, name: &str, args: Vec<Value>) -> Ready<Result<Value>> {
        ready(self.invoke(name, args))
    }

    /// Dispatch a call and convert the result into a Rust type
    pub fn call<T: FromValue>(&self, name: &str, args: Vec<Value>) -> Result<T> {
        let value = self.invoke(name, args)?;
        self.convert(name, value)
    }

    /// Read a property
    pub fn get(&self, name: &str) -> Result<Value> {
        let property = self.property(name)?;
        if !property.access.can_read() {
            return Err(self.invalid_access(name, AccessKind::Get));
        }

        let mut state = self.state.lock();
        self.record(&mut state, name, AccessKind::Get, Vec::new());
        let value = state.properties.get(name).and_then(|slot| match &slot.mode {
            Some(PropertyMode::Fixed(value)) => Some(value.clone()),
            _ => slot.value.clone(),
        });
        Ok(value.unwrap_or_else(|| property.ty.default_value()))
    }

    /// Read a property and convert it into a Rust type
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self.get(name)?;
        self.convert(name, value)
    }

    /// Assign a property
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let property = self.property(name)?;
        if !property.access.can_write() {
            return Err(self.invalid_access(name, AccessKind::Set));
        }
        self.check_type(name, &property.ty, &value)?;

        let mut state = self.state.lock();
        self.record(&mut state, name, AccessKind::Set, vec![value.clone()]);
        let slot = state.properties.entry(name.to_string()).or_default();
        if slot.mode.as_ref().map_or(true, PropertyMode::is_tracked) {
            slot.value = Some(value);
        }
        Ok(())
    }

    // ---- verification ----

    /// Check how often `name` was called with arguments matching `matcher`
    pub fn verify(&self, name: &str, matcher: impl Into<CallMatcher>, times: Times) -> Result<()> {
        let matcher = matcher.into();
        self.resolve_methods(name, matcher.arity())?;

        let calls = self.snapshot(name, AccessKind::Call);
        let actual = calls.iter().filter(|inv| matcher.matches(&inv.args)).count();
        self.check(name, AccessKind::Call, matcher.describe(), times, actual, &calls)
    }

    /// Check how often a property was read
    pub fn verify_get(&self, name: &str, times: Times) -> Result<()> {
        self.property(name)?;
        let reads = self.snapshot(name, AccessKind::Get);
        self.check(name, AccessKind::Get, String::new(), times, reads.len(), &reads)
    }

    /// Check how often a property was assigned a value matching `matcher`
    pub fn verify_set(&self, name: &str, matcher: ArgMatcher, times: Times) -> Result<()> {
        self.property(name)?;
        let writes = self.snapshot(name, AccessKind::Set);
        let actual = Self::count_sets(&writes, &matcher);
        self.check(name, AccessKind::Set, matcher.to_string(), times, actual, &writes)
    }

    /// Fail for the first setter expectation that no recorded set satisfied
    pub fn verify_all_configured_setters_called(&self) -> Result<()> {
        let expectations: Vec<(String, ArgMatcher)> = self
            .state
            .lock()
            .setter_expectations
            .iter()
            .map(|e| (e.property.clone(), e.matcher.clone()))
            .collect();

        for (property, matcher) in expectations {
            let writes = self.snapshot(&property, AccessKind::Set);
            let actual = Self::count_sets(&writes, &matcher);
            self.check(
                &property,
                AccessKind::Set,
                matcher.to_string(),
                Times::at_least_once(),
                actual,
                &writes,
            )?;
        }
        Ok(())
    }

    /// Check setter expectations, then every method configured with
    /// [`expect_method`](Self::expect_method)
    ///
    /// An expectation installed with `CallMatcher::AnyArgs` is satisfied by a
    /// call to any overload of the method.
    pub fn verify_all(&self) -> Result<()> {
        self.verify_all_configured_setters_called()?;

        let mut verifiable: Vec<(String, MethodSetup)> = Vec::new();
        {
            let state = self.state.lock();
            for ((name, _), setups) in &state.setups {
                for setup in setups.iter().filter(|s| s.verifiable) {
                    let seen = verifiable
                        .iter()
                        .any(|(n, s)| n == name && s.description == setup.description);
                    if !seen {
                        verifiable.push((name.clone(), setup.clone()));
                    }
                }
            }
        }
        verifiable.sort_by(|a, b| (&a.0, &a.1.description).cmp(&(&b.0, &b.1.description)));

        for (name, setup) in verifiable {
            let calls = self.snapshot(&name, AccessKind::Call);
            let actual = calls.iter().filter(|inv| setup.matcher.matches(&inv.args)).count();
            self.check(
                &name,
                AccessKind::Call,
                setup.description,
                Times::at_least_once(),
                actual,
                &calls,
            )?;
        }
        Ok(())
    }

    /// Copy of the invocation log in call order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state.lock().log.snapshot()
    }

    pub fn invocation_count(&self) -> usize {
        self.state.lock().log.len()
    }

    // ---- internals ----

    fn install_setup(
        &self,
        name: &str,
        matcher: CallMatcher,
        behavior: Behavior,
        verifiable: bool,
    ) -> Result<()> {
        let signatures = self.resolve_methods(name, matcher.arity())?;
        if let Behavior::Return(value) = &behavior {
            for signature in &signatures {
                self.check_type(name, &signature.returns, value)?;
            }
        }

        let description = matcher.describe();
        debug!(
            contract = %self.contract.name(),
            method = name,
            matcher = %description,
            behavior = ?behavior,
            verifiable,
            "Configured method"
        );

        let mut state = self.state.lock();
        for signature in signatures {
            let setups = state
                .setups
                .entry((signature.name.clone(), signature.arity()))
                .or_default();
            setups.retain(|s| s.description != description);
            setups.push(MethodSetup {
                matcher: matcher.clone(),
                description: description.clone(),
                behavior: behavior.clone(),
                verifiable,
            });
        }
        Ok(())
    }

    fn apply(&self, signature: &MethodSignature, behavior: Behavior, args: &[Value]) -> Result<Value> {
        match behavior {
            Behavior::Default => Ok(signature.returns.default_value()),
            Behavior::Return(value) => Ok(value),
            Behavior::Compute(rule) => {
                let value = rule(args);
                self.check_type(&signature.name, &signature.returns, &value)?;
                Ok(value)
            }
            Behavior::Raise(message) => Err(DoubleError::Raised {
                member: self.qualified(&signature.name),
                message,
            }),
        }
    }

    fn record(&self, state: &mut DoubleState, member: &str, access: AccessKind, args: Vec<Value>) {
        let sequence = state.log.record(member, access, args);
        if self.settings.log_invocations {
            trace!(contract = %self.contract.name(), member, %access, sequence, "Recorded invocation");
        }
    }

    fn check(
        &self,
        member: &str,
        access: AccessKind,
        matcher: String,
        expected: Times,
        actual: usize,
        recorded: &[Invocation],
    ) -> Result<()> {
        if expected.matches(actual) {
            debug!(contract = %self.contract.name(), member, %access, %expected, actual, "Verification passed");
            return Ok(());
        }

        debug!(contract = %self.contract.name(), member, %access, %expected, actual, "Verification failed");
        Err(VerificationFailure {
            contract: self.contract.name().to_string(),
            member: member.to_string(),
            access,
            matcher,
            expected,
            actual,
            recorded: recorded.iter().map(ToString::to_string).collect(),
        }
        .into())
    }

    fn count_sets(writes: &[Invocation], matcher: &ArgMatcher) -> usize {
        writes
            .iter()
            .filter(|inv| inv.args.first().is_some_and(|v| matcher.matches(v)))
            .count()
    }

    fn snapshot(&self, member: &str, access: AccessKind) -> Vec<Invocation> {
        self.state.lock().log.of(member, access).cloned().collect()
    }

    fn resolve_methods(&self, name: &str, arity: Option<usize>) -> Result<Vec<&MethodSignature>> {
        let signatures: Vec<&MethodSignature> = match arity {
            Some(arity) => self.contract.method(name, arity).into_iter().collect(),
            None => self.contract.methods().filter(|m| m.name == name).collect(),
        };
        if signatures.is_empty() {
            return Err(self.unknown_member(name));
        }
        Ok(signatures)
    }

    fn property(&self, name: &str) -> Result<&PropertySignature> {
        self.contract
            .property(name)
            .ok_or_else(|| self.unknown_member(name))
    }

    fn check_type(&self, member: &str, ty: &ValueType, value: &Value) -> Result<()> {
        if ty.accepts(value) {
            Ok(())
        } else {
            Err(DoubleError::type_mismatch(&self.qualified(member), ty, value.kind()))
        }
    }

    fn convert<T: FromValue>(&self, member: &str, value: Value) -> Result<T> {
        let kind = value.kind();
        T::from_value(value).ok_or_else(|| {
            DoubleError::type_mismatch(&self.qualified(member), std::any::type_name::<T>(), kind)
        })
    }

    fn unknown_member(&self, name: &str) -> DoubleError {
        DoubleError::unknown_member(self.contract.name(), name)
    }

    fn invalid_access(&self, name: &str, access: AccessKind) -> DoubleError {
        DoubleError::InvalidAccess {
            member: self.qualified(name),
            access: access.to_string(),
        }
    }

    fn qualified(&self, member: &str) -> String {
        format!("{}.{}", self.contract.name(), member)
    }
}
