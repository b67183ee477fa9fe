//! Which contracts get deployed, with which arguments and tags

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Bytes, U256},
};

pub const TAG_ALL: &str = "all";

/// 10^27 base units, one billion tokens at 18 decimals.
pub fn initial_supply() -> U256 {
    U256::from(10u8).pow(U256::from(27u8))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedContract {
    pub name: &'static str,
    pub tags: &'static [&'static str],
    pub constructor_args: Vec<U256>,
}

impl PlannedContract {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.is_empty() || tags.iter().any(|t| self.tags.contains(&t.as_str()))
    }

    /// Constructor arguments ABI-encoded as a parameter list.
    pub fn encoded_args(&self) -> Vec<u8> {
        if self.constructor_args.is_empty() {
            return Vec::new();
        }
        DynSolValue::Tuple(
            self.constructor_args
                .iter()
                .map(|arg| DynSolValue::Uint(*arg, 256))
                .collect(),
        )
        .abi_encode_params()
    }

    pub fn init_code(&self, bytecode: &Bytes) -> Bytes {
        let mut code = bytecode.to_vec();
        code.extend_from_slice(&self.encoded_args());
        code.into()
    }

    pub fn display_args(&self) -> Vec<String> {
        self.constructor_args.iter().map(U256::to_string).collect()
    }
}

/// Test tokens first, then the swap example contract.
pub fn deployment_plan() -> Vec<PlannedContract> {
    const TOKEN_TAGS: &[&str] = &[TAG_ALL, "tokens"];
    let mut plan: Vec<PlannedContract> = ["TestDAI", "TestUSDT", "TestUSDC", "WETH"]
        .into_iter()
        .map(|name| PlannedContract {
            name,
            tags: TOKEN_TAGS,
            constructor_args: vec![initial_supply()],
        })
        .collect();
    plan.push(PlannedContract {
        name: "SwapExamples",
        tags: &[TAG_ALL, "swapExamples"],
        constructor_args: Vec::new(),
    });
    plan
}

pub fn select(tags: &[String]) -> Vec<PlannedContract> {
    deployment_plan().into_iter().filter(|c| c.has_any_tag(tags)).collect()
}
