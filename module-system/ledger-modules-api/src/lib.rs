#![doc = include_str!("../README.md")]

mod address;
pub mod default_context;
mod error;
mod prefix;
pub mod utils;

use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::address::{Address, AddressBech32};
pub use crate::error::{Bech32ParseError, ModuleError};
pub use crate::prefix::ModulePrefix;
pub use ledger_state::{
    Event, Prefix, StateCheckpoint, StateMap, StateValue, StateVec, Storage, WorkingSet,
};

/// The `Spec` trait configures the key primitives used by a particular deployment of the ledger.
/// It is almost always implemented on a Context object; since all Modules are generic
/// over a Context, swapping the storage or the address format doesn't touch the module code.
pub trait Spec {
    /// The address type identifying callers and modules.
    type Address: Clone
        + Debug
        + Display
        + Eq
        + Hash
        + From<[u8; 32]>
        + FromStr<Err = anyhow::Error>
        + BorshSerialize
        + BorshDeserialize
        + Serialize
        + DeserializeOwned
        + schemars::JsonSchema
        + Send
        + Sync;

    /// State storage used by the ledger.
    type Storage: Storage + Send + Sync;
}

/// A context contains information which is passed to modules during
/// call execution. Currently, context includes the sender of the call
/// as established by the boundary that admitted it.
pub trait Context: Spec + Clone + Debug + PartialEq {
    /// Sender of the transaction.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// Response type for the `Module::call` method. Events go to the working set.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}

/// A state module: a genesis step and a call dispatcher.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Module defined event resulting from a call method.
    type Event: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called once when the ledger is deployed and sets the initial state values.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined message and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, ModuleError>;
}

/// A [`Module`] that has a well-defined and known [JSON
/// Schema](https://json-schema.org/) for its [`Module::CallMessage`].
///
/// This trait is intended to support code generation tools, CLIs, and
/// documentation.
pub trait ModuleCallJsonSchema: Module {
    /// Returns the JSON schema for [`Module::CallMessage`].
    fn json_schema() -> String;
}

/// Every module has to implement this trait.
pub trait ModuleInfo: Default {
    /// Execution context.
    type Context: Context;

    /// Returns address of the module.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// Returns the prefix of the module.
    fn prefix(&self) -> ModulePrefix;
}
