//! Records of the fake e-commerce API (`/users`, `/auth/login`).

use serde::{Deserialize, Serialize};

/// Person name of a store user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
}

impl Name {
    /// Creates a name.
    #[must_use]
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// Coordinates, kept as the strings the API returns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Geolocation {
    /// Latitude.
    pub lat: String,
    /// Longitude.
    pub long: String,
}

impl Geolocation {
    /// Creates a geolocation.
    #[must_use]
    pub fn new(lat: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            long: long.into(),
        }
    }
}

/// Postal address of a store user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    /// City.
    pub city: String,
    /// Street name.
    pub street: String,
    /// House number.
    pub number: u32,
    /// Zip code, `ddddd-dddd` on the public service.
    pub zipcode: String,
    /// Coordinates.
    pub geolocation: Geolocation,
}

impl Address {
    /// Starts building an address.
    #[must_use]
    pub fn builder() -> AddressBuilder {
        AddressBuilder::default()
    }
}

/// Fluent builder for [`Address`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct AddressBuilder {
    inner: Address,
}

impl AddressBuilder {
    /// Sets the city.
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.inner.city = city.into();
        self
    }

    /// Sets the street.
    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.inner.street = street.into();
        self
    }

    /// Sets the house number.
    pub const fn number(mut self, number: u32) -> Self {
        self.inner.number = number;
        self
    }

    /// Sets the zip code.
    pub fn zipcode(mut self, zipcode: impl Into<String>) -> Self {
        self.inner.zipcode = zipcode.into();
        self
    }

    /// Sets the coordinates.
    pub fn geolocation(mut self, geolocation: Geolocation) -> Self {
        self.inner.geolocation = geolocation;
        self
    }

    /// Finishes the address.
    #[must_use]
    pub fn build(self) -> Address {
        self.inner
    }
}

/// A user record of the fake store.
///
/// `id` and `version` are assigned by the server and left out of request
/// bodies when unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreUser {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// E-mail address.
    #[serde(default)]
    pub email: String,
    /// Plain-text password, as the API echoes it.
    #[serde(default)]
    pub password: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Person name.
    #[serde(default)]
    pub name: Name,
    /// Postal address.
    #[serde(default)]
    pub address: Address,
    /// Document revision (`__v`), server-assigned.
    #[serde(rename = "__v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl StoreUser {
    /// Starts building a user.
    #[must_use]
    pub fn builder() -> StoreUserBuilder {
        StoreUserBuilder::default()
    }

    /// Returns a copy without the server-assigned fields.
    #[must_use]
    pub fn without_server_fields(&self) -> Self {
        Self {
            id: None,
            version: None,
            ..self.clone()
        }
    }
}

/// Fluent builder for [`StoreUser`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct StoreUserBuilder {
    inner: StoreUser,
}

impl StoreUserBuilder {
    /// Sets the login name.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.inner.username = username.into();
        self
    }

    /// Sets the e-mail address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.inner.email = email.into();
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.inner.password = password.into();
        self
    }

    /// Sets the phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.inner.phone = phone.into();
        self
    }

    /// Sets the person name.
    pub fn name(mut self, name: Name) -> Self {
        self.inner.name = name;
        self
    }

    /// Sets the address.
    pub fn address(mut self, address: Address) -> Self {
        self.inner.address = address;
        self
    }

    /// Finishes the user.
    #[must_use]
    pub fn build(self) -> StoreUser {
        self.inner
    }
}

/// Credentials for `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl AuthData {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body returned by login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Issued token.
    pub token: String,
}
