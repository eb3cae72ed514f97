//! User-facing messages for failures, per surface and locale.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorCategory, InvalidInputError};

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Swedish,
    English,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sv" | "sv-se" | "swedish" => Ok(Locale::Swedish),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::English),
            _ => Err(InvalidInputError::Other {
                message: format!("unsupported locale '{}'", s),
            }
            .into()),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Swedish => f.write_str("sv"),
            Locale::English => f.write_str("en"),
        }
    }
}

/// The form or page that is reporting a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Login,
    Register,
    PasswordReset,
    Profile,
    Purchases,
    Courses,
    CourseSearch,
    Checkout,
    Portal,
}

/// Pick the text for `(swedish, english)`.
fn pick(locale: Locale, sv: &str, en: &str) -> String {
    match locale {
        Locale::Swedish => sv.to_string(),
        Locale::English => en.to_string(),
    }
}

/// Map a failure to the message a surface shows its user.
///
/// Messages supplied by the backend are preferred for rejected form
/// submissions, as they carry the server's reason.
pub fn user_message(err: &Error, surface: Surface, locale: Locale) -> String {
    match err.category() {
        ErrorCategory::NetworkUnreachable => pick(
            locale,
            "Kunde inte nå servern. Kontrollera din internetanslutning.",
            "Could not reach the server. Check your internet connection.",
        ),
        ErrorCategory::Forbidden => pick(
            locale,
            "Du har inte behörighet att göra detta.",
            "You do not have permission to do this.",
        ),
        ErrorCategory::Unauthenticated => unauthenticated(err, surface, locale),
        ErrorCategory::InvalidInput => invalid_input(err, surface, locale),
        ErrorCategory::ServerError => server_error(err, surface, locale),
        ErrorCategory::Storage => pick(
            locale,
            "Kunde inte läsa eller spara sessionen på den här datorn.",
            "Could not read or save the session on this computer.",
        ),
    }
}

fn unauthenticated(err: &Error, surface: Surface, locale: Locale) -> String {
    match surface {
        Surface::Login => err.server_message().map(str::to_string).unwrap_or_else(|| {
            pick(
                locale,
                "Inloggningen misslyckades. Kontrollera dina uppgifter.",
                "Login failed. Please check your credentials.",
            )
        }),
        Surface::Checkout if err.status().is_none() => pick(
            locale,
            "Vänligen logga in för att genomföra köpet",
            "Please log in to complete the purchase",
        ),
        Surface::Portal if err.status().is_none() => pick(
            locale,
            "Vänligen logga in för att hantera din prenumeration",
            "Please log in to manage your subscription",
        ),
        _ => pick(
            locale,
            "Vänligen logga in för att fortsätta",
            "Please log in to continue",
        ),
    }
}

fn invalid_input(err: &Error, surface: Surface, locale: Locale) -> String {
    let Error::InvalidInput(input) = err else {
        return err.to_string();
    };
    match input {
        InvalidInputError::MissingField { field } => match (surface, *field) {
            (Surface::Login, _) => pick(
                locale,
                "E-post och lösenord krävs",
                "Email and password are required",
            ),
            (Surface::Register, _) => pick(
                locale,
                "Alla fält märkta med * är obligatoriska",
                "All fields marked with * are required",
            ),
            (Surface::Profile, _) => pick(
                locale,
                "Namn, efternamn och e-post är obligatoriska fält",
                "Name, last name and email are required",
            ),
            (Surface::Checkout, "email") => pick(
                locale,
                "E-postadress krävs för gästköp",
                "An email address is required for guest purchases",
            ),
            (_, "email") => pick(locale, "E-postadress krävs", "Email address is required"),
            _ => pick(
                locale,
                "Fyll i alla obligatoriska fält",
                "Fill in all required fields",
            ),
        },
        InvalidInputError::PasswordMismatch => {
            pick(locale, "Lösenorden matchar inte", "Passwords do not match")
        }
        InvalidInputError::PasswordTooShort { min } => match locale {
            Locale::Swedish => format!("Lösenordet måste vara minst {} tecken långt", min),
            Locale::English => format!("Password must be at least {} characters long", min),
        },
        InvalidInputError::Email { .. } => pick(
            locale,
            "Ogiltigt format på e-postadressen",
            "Invalid email address format",
        ),
        other => other.to_string(),
    }
}

fn server_error(err: &Error, surface: Surface, locale: Locale) -> String {
    let not_found = matches!(err, Error::Server(server) if server.is_not_found());
    if not_found && matches!(surface, Surface::Checkout | Surface::Portal) {
        return pick(
            locale,
            "Tjänsten är inte tillgänglig. Vänligen försök igen senare.",
            "The service is unavailable. Please try again later.",
        );
    }

    if let Some(message) = err.server_message() {
        return message.to_string();
    }

    match surface {
        Surface::Login => pick(
            locale,
            "Inloggningen misslyckades. Försök igen.",
            "Login failed. Please try again.",
        ),
        Surface::Register => pick(
            locale,
            "Registrering misslyckades. Försök igen.",
            "Registration failed. Please try again.",
        ),
        Surface::PasswordReset => pick(
            locale,
            "Kunde inte skicka återställningslänk. Försök igen.",
            "Could not send the reset link. Please try again.",
        ),
        Surface::Profile => pick(
            locale,
            "Kunde inte uppdatera profilen. Försök igen.",
            "Could not update the profile. Please try again.",
        ),
        Surface::Purchases => pick(
            locale,
            "Kunde inte hämta köphistorik",
            "Could not load purchase history",
        ),
        Surface::Courses => pick(locale, "Kunde inte hämta kurser", "Could not load courses"),
        Surface::CourseSearch => pick(locale, "Kunde inte söka kurser", "Could not search courses"),
        Surface::Checkout => match err.status() {
            Some(status) => format!("{}: HTTP {}", pick(locale, "Fel", "Error"), status),
            None => pick(
                locale,
                "Kunde inte starta betalningen. Försök igen.",
                "Could not start the payment. Please try again.",
            ),
        },
        Surface::Portal => pick(
            locale,
            "Kunde inte öppna portalen. Försök igen.",
            "Could not open the portal. Please try again.",
        ),
    }
}
