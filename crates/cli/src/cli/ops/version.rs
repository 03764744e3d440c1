use clap::Args;

use crate::version::build_info;

/// Print build information
#[derive(Args, Debug, Clone)]
pub struct Version;

impl crate::cli::op::Op for Version {
    type Error = std::convert::Infallible;
    type Output = String;

    fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(build_info().to_string())
    }
}
