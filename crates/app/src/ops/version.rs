use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Version;

/// Build information captured by build.rs
pub fn build_info() -> String {
    format!(
        "{} {} ({}, {} build for {}, built {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("REPO_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET"),
        env!("BUILD_TIMESTAMP"),
    )
}

#[async_trait::async_trait]
impl crate::op::Op for Version {
    type Error = std::convert::Infallible;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(build_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_names_package() {
        let info = build_info();
        assert!(info.starts_with(&format!("ufs {}", env!("CARGO_PKG_VERSION"))));
    }
}
