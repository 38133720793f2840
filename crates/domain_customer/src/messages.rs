//! Localised message catalog
//!
//! Messages live in Fluent resources embedded at compile time, one per
//! supported locale. The caller's locale is negotiated from an
//! `Accept-Language` header value; English is the fallback.

use std::collections::HashMap;

use fluent::concurrent::FluentBundle;
use fluent::{FluentArgs, FluentResource};
use fluent_langneg::{accepted_languages, negotiate_languages, NegotiationStrategy};
use unic_langid::{langid, LanguageIdentifier};

use core_kernel::CoreError;

const EN_MESSAGES: &str = include_str!("../locales/en/customer.ftl");
const ES_MESSAGES: &str = include_str!("../locales/es/customer.ftl");

/// Identifies a localised message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    FirstNameRequired,
    LastNameRequired,
    EmailRequired,
    EmailInvalidFormat,
    PhoneNumberRequired,
    PhoneNumberInvalidFormat,
    StreetRequired,
    CityRequired,
    StateRequired,
    ZipCodeRequired,
    CountryRequired,
    ValidationFailed,
    CustomerNotFound,
    Conflict,
    PermissionDenied,
    Unauthorized,
    Unexpected,
    UnsupportedApiVersion,
    MalformedBody,
}

impl MessageKey {
    /// Returns the Fluent message id
    pub fn id(self) -> &'static str {
        match self {
            MessageKey::FirstNameRequired => "customer-first-name-required",
            MessageKey::LastNameRequired => "customer-last-name-required",
            MessageKey::EmailRequired => "customer-email-required",
            MessageKey::EmailInvalidFormat => "customer-email-invalid-format",
            MessageKey::PhoneNumberRequired => "customer-phone-number-required",
            MessageKey::PhoneNumberInvalidFormat => "customer-phone-number-invalid-format",
            MessageKey::StreetRequired => "customer-street-required",
            MessageKey::CityRequired => "customer-city-required",
            MessageKey::StateRequired => "customer-state-required",
            MessageKey::ZipCodeRequired => "customer-zip-code-required",
            MessageKey::CountryRequired => "customer-country-required",
            MessageKey::ValidationFailed => "customer-validation-failed",
            MessageKey::CustomerNotFound => "customer-not-found",
            MessageKey::Conflict => "customer-conflict",
            MessageKey::PermissionDenied => "access-denied",
            MessageKey::Unauthorized => "unauthorized",
            MessageKey::Unexpected => "unexpected-error",
            MessageKey::UnsupportedApiVersion => "unsupported-api-version",
            MessageKey::MalformedBody => "malformed-request-body",
        }
    }

    /// Every key, in declaration order
    pub const ALL: [MessageKey; 19] = [
        MessageKey::FirstNameRequired,
        MessageKey::LastNameRequired,
        MessageKey::EmailRequired,
        MessageKey::EmailInvalidFormat,
        MessageKey::PhoneNumberRequired,
        MessageKey::PhoneNumberInvalidFormat,
        MessageKey::StreetRequired,
        MessageKey::CityRequired,
        MessageKey::StateRequired,
        MessageKey::ZipCodeRequired,
        MessageKey::CountryRequired,
        MessageKey::ValidationFailed,
        MessageKey::CustomerNotFound,
        MessageKey::Conflict,
        MessageKey::PermissionDenied,
        MessageKey::Unauthorized,
        MessageKey::Unexpected,
        MessageKey::UnsupportedApiVersion,
        MessageKey::MalformedBody,
    ];
}

/// Localised messages for every supported locale
pub struct MessageCatalog {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    available: Vec<LanguageIdentifier>,
    default_locale: LanguageIdentifier,
}

impl std::fmt::Debug for MessageCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCatalog")
            .field("available", &self.available)
            .field("default_locale", &self.default_locale)
            .finish()
    }
}

impl MessageCatalog {
    /// Builds the catalog from the embedded `en` and `es` resources
    pub fn embedded() -> Result<Self, CoreError> {
        let mut catalog = Self {
            bundles: HashMap::new(),
            available: Vec::new(),
            default_locale: langid!("en"),
        };
        catalog.add_locale(langid!("en"), EN_MESSAGES)?;
        catalog.add_locale(langid!("es"), ES_MESSAGES)?;
        Ok(catalog)
    }

    fn add_locale(&mut self, locale: LanguageIdentifier, source: &str) -> Result<(), CoreError> {
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            CoreError::configuration(format!("invalid {locale} messages: {errors:?}"))
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            CoreError::configuration(format!("duplicate {locale} messages: {errors:?}"))
        })?;

        self.available.push(locale.clone());
        self.bundles.insert(locale, bundle);
        Ok(())
    }

    /// Returns the fallback locale
    pub fn default_locale(&self) -> &LanguageIdentifier {
        &self.default_locale
    }

    /// Returns the supported locales
    pub fn available_locales(&self) -> &[LanguageIdentifier] {
        &self.available
    }

    /// Picks the best supported locale for an `Accept-Language` header value
    pub fn negotiate(&self, accept_language: Option<&str>) -> LanguageIdentifier {
        let requested = accept_language
            .map(accepted_languages::parse)
            .unwrap_or_default();

        negotiate_languages(
            &requested,
            &self.available,
            Some(&self.default_locale),
            NegotiationStrategy::Lookup,
        )
        .first()
        .map(|locale| (*locale).clone())
        .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Formats a message without arguments
    pub fn message(&self, locale: &LanguageIdentifier, key: MessageKey) -> String {
        self.format(locale, key, None)
    }

    /// Formats a message in `locale`, falling back to the default locale
    ///
    /// Returns the message id when no bundle defines it.
    pub fn format(
        &self,
        locale: &LanguageIdentifier,
        key: MessageKey,
        args: Option<&FluentArgs>,
    ) -> String {
        [locale, &self.default_locale]
            .into_iter()
            .filter_map(|l| self.bundles.get(l))
            .find_map(|bundle| {
                let pattern = bundle.get_message(key.id())?.value()?;
                let mut errors = Vec::new();
                let text = bundle.format_pattern(pattern, args, &mut errors);
                Some(text.into_owned())
            })
            .unwrap_or_else(|| key.id().to_string())
    }

    /// Formats the not-found message for a customer id
    pub fn customer_not_found(&self, locale: &LanguageIdentifier, customer_id: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("id", customer_id.to_string());
        self.format(locale, MessageKey::CustomerNotFound, Some(&args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::embedded().unwrap()
    }

    #[test]
    fn test_every_key_is_defined_in_every_locale() {
        let catalog = catalog();
        for locale in catalog.available_locales() {
            let bundle = &catalog.bundles[locale];
            for key in MessageKey::ALL {
                assert!(
                    bundle.has_message(key.id()),
                    "{} missing from {locale}",
                    key.id()
                );
            }
        }
    }

    #[test]
    fn test_not_found_message() {
        let catalog = catalog();
        let en = langid!("en");
        let es = langid!("es");

        assert_eq!(
            catalog.customer_not_found(&en, "66aeee845291a2632f91d95a"),
            "Customer with customer id 66aeee845291a2632f91d95a not found"
        );
        assert_eq!(
            catalog.customer_not_found(&es, "66aeee845291a2632f91d95a"),
            "Cliente con id de cliente 66aeee845291a2632f91d95a no encontrado"
        );
    }

    #[test]
    fn test_negotiation() {
        let catalog = catalog();

        assert_eq!(catalog.negotiate(None), langid!("en"));
        assert_eq!(catalog.negotiate(Some("es-PE,es;q=0.9")), langid!("es"));
        assert_eq!(catalog.negotiate(Some("fr-FR")), langid!("en"));
    }
}
