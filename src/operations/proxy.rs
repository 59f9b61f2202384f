use strum::{AsRefStr, EnumString};

use crate::{
    Credentials, Result,
    model::{ProxyKind, ProxySettings},
    runtime::ParameterReader,
};

/// Where the outbound proxy comes from, from `whichProxyToUse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
pub enum ProxySource {
    #[default]
    #[strum(serialize = "proxyFromCredentials")]
    Credentials,
    #[strum(serialize = "proxyFromNode")]
    PreviousNode,
    #[strum(serialize = "proxyFromScrappey")]
    Scrappey,
    #[strum(serialize = "noProxy")]
    Disabled,
}

/// Proxy parameters of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyChoice {
    pub source: ProxySource,
    pub kind: ProxyKind,
    /// Set only when the country toggle is on and a country was picked.
    pub country: Option<String>,
    /// Route the Scrappey pool through the credential proxy.
    pub use_credential_proxy: bool,
}

impl ProxyChoice {
    pub fn read(reader: &ParameterReader<'_>) -> Result<Self> {
        let country = if reader.flag("customProxyCountryBoolean")? {
            reader.non_empty("customProxyCountry")?
        } else {
            None
        };

        Ok(Self {
            source: reader.choice("whichProxyToUse")?,
            kind: reader.choice("proxyType")?,
            country,
            use_credential_proxy: reader.flag("custom_proxy")?,
        })
    }

    /// Write the proxy fields into `settings`.
    ///
    /// Precedence: disabled, then the credential proxy, then the previous
    /// node's proxy, then the Scrappey pool (optionally tunnelled through the
    /// credential proxy).
    pub fn apply(
        &self,
        settings: &mut ProxySettings,
        credentials: &Credentials,
        node_proxy: Option<&str>,
    ) {
        match self.source {
            ProxySource::Disabled => {
                settings.no_proxy = true;
                settings.proxy = None;
            }
            ProxySource::Credentials => {
                settings.proxy = credentials.proxy().map(str::to_string);
            }
            ProxySource::PreviousNode => {
                settings.proxy = node_proxy.filter(|proxy| !proxy.trim().is_empty()).map(str::to_string);
            }
            ProxySource::Scrappey => {
                settings.set_kind(self.kind);
                if let Some(country) = &self.country {
                    settings.proxy_country = Some(country.clone());
                }
                if self.use_credential_proxy {
                    settings.proxy = credentials.proxy().map(str::to_string);
                }
            }
        }
    }
}
