// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use davcheck_webdav::{
    Actor, DavClient, DavPathVersion, DavResponse, Depth, Document, ETag, Namespace,
    PropPatchRequest, PropName, PropertyQuery, prop_names,
};

use crate::actors::Actors;
use crate::address::PropertyAddress;
use crate::check::{self, EntryProperty};
use crate::config::Config;
use crate::error::{Error, Failure};
use crate::etag::{EtagExpectation, EtagStore};
use crate::namespaces::Namespaces;
use crate::share::ShareTokens;
use crate::substitute::{self, Substitutions};
use crate::table::Table;

/// Property listed when looking up etags.
const GETETAG: &str = "d:getetag";

/// Property listed when looking up locks.
const LOCKDISCOVERY: &str = "d:lockdiscovery";

/// State of one scenario: who is acting, what was stored, what came back.
///
/// A scenario is created fresh and dropped at its end; nothing it stores is
/// shared with another scenario.
#[derive(Debug)]
pub struct Scenario {
    config: Config,
    client: DavClient,
    actors: Actors,
    shares: ShareTokens,
    etags: EtagStore,
    namespaces: Namespaces,
    current_user: Option<String>,
    last_response: Option<DavResponse>,
}

impl Scenario {
    /// Creates a scenario against the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(mut config: Config) -> Result<Self, Error> {
        config.normalize();
        let client = DavClient::new(config.server.clone())?;
        Ok(Self {
            actors: Actors::from_config(&config),
            shares: ShareTokens::new(config.sharing.ng),
            etags: EtagStore::new(),
            namespaces: Namespaces::default(),
            current_user: None,
            last_response: None,
            client,
            config,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Sets who "the user" is in later operations.
    pub fn set_current_user(&mut self, user: &str) {
        self.current_user = Some(self.actors.actual_username(user));
    }

    /// Public link tokens, for recording newly created links.
    pub fn shares_mut(&mut self) -> &mut ShareTokens {
        &mut self.shares
    }

    /// Etags stored so far.
    #[must_use]
    pub const fn etags(&self) -> &EtagStore {
        &self.etags
    }

    /// Stored etags, for seeding snapshots taken elsewhere.
    pub fn etags_mut(&mut self) -> &mut EtagStore {
        &mut self.etags
    }

    /// Prefix bindings used by later checks.
    #[must_use]
    pub const fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Binds an extra prefix, written `x1='http://…'`, for later checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the binding cannot be parsed.
    pub fn register_namespace(&mut self, namespace: &str) -> Result<(), Error> {
        let namespace: Namespace = namespace.parse()?;
        self.namespaces.register(&namespace);
        Ok(())
    }

    /// The response of the last recorded request.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::NoResponse`] before any request.
    pub fn last_response(&self) -> Result<&DavResponse, Failure> {
        self.last_response.as_ref().ok_or(Failure::NoResponse)
    }

    /// Records a response as the last one, for responses obtained elsewhere.
    pub fn set_last_response(&mut self, response: DavResponse) {
        self.last_response = Some(response);
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Lists the server's default properties of an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be made.
    pub async fn get_properties(
        &mut self,
        user: &str,
        path: &str,
        depth: Depth,
    ) -> Result<&DavResponse, Error> {
        let response = self.list::<&str>(user, path, depth, &[], None, None).await?;
        Ok(&*self.last_response.insert(response))
    }

    /// Lists the properties named in the `propertyName` column of an entry
    /// and its children.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is malformed or the request fails.
    pub async fn get_following_properties(
        &mut self,
        user: &str,
        path: &str,
        properties: &Table,
    ) -> Result<&DavResponse, Error> {
        let response = self.properties_of(user, path, None, properties).await?;
        Ok(&*self.last_response.insert(response))
    }

    /// As [`Self::get_following_properties`], for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] without a current user.
    pub async fn current_user_gets_following_properties(
        &mut self,
        path: &str,
        properties: &Table,
    ) -> Result<&DavResponse, Error> {
        let user = self.current_user()?;
        self.get_following_properties(&user, path, properties).await
    }

    /// Requests a single, possibly custom, property of an entry.
    ///
    /// `namespace` binds the property prefix, written `x1='http://…'`.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace or name is invalid or the request
    /// fails.
    pub async fn get_custom_property(
        &mut self,
        user: &str,
        property: &str,
        namespace: Option<&str>,
        path: &str,
    ) -> Result<&DavResponse, Error> {
        let namespace = parse_namespace(namespace)?;
        let response = self
            .list(user, path, Depth::Zero, &[property], namespace.as_ref(), None)
            .await?;
        Ok(&*self.last_response.insert(response))
    }

    /// Lists properties of an entry inside the last created public link.
    ///
    /// # Errors
    ///
    /// Returns an error without a public link, on a malformed table, or if
    /// the request fails.
    pub async fn public_gets_following_properties(
        &mut self,
        path: &str,
        properties: &Table,
    ) -> Result<&DavResponse, Error> {
        let names = property_column(properties)?;
        let response = self.list_public(path, &names).await?;
        Ok(&*self.last_response.insert(response))
    }

    /// Sets a property and records the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be made.
    pub async fn set_property(
        &mut self,
        user: &str,
        property: &str,
        namespace: Option<&str>,
        path: &str,
        value: &str,
    ) -> Result<&DavResponse, Error> {
        let response = self.patch(user, path, &[(property, value)], namespace).await?;
        Ok(&*self.last_response.insert(response))
    }

    /// Sets a property, which must succeed with 207.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::Status`] on any other status.
    pub async fn has_set_property(
        &mut self,
        user: &str,
        property: &str,
        namespace: Option<&str>,
        path: &str,
        value: &str,
    ) -> Result<(), Error> {
        let response = self.patch(user, path, &[(property, value)], namespace).await?;
        expect_status(&response, 207)
    }

    /// Sets the properties of a `propertyName`/`propertyValue` table, which
    /// must succeed with 207.
    ///
    /// # Errors
    ///
    /// Fails on a malformed table or any status but 207.
    pub async fn has_set_properties(
        &mut self,
        user: &str,
        path: &str,
        properties: &Table,
    ) -> Result<(), Error> {
        properties.verify_columns(&["propertyName", "propertyValue"], &[])?;
        let rows = properties.column_hash();
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r["propertyName"], r["propertyValue"]))
            .collect();
        let response = self.patch(user, path, &pairs, None).await?;
        expect_status(&response, 207)
    }

    // ---------------------------------------------------------------------
    // Checks of the last response
    // ---------------------------------------------------------------------

    /// Fails unless the last response has the given status.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::Status`] or [`Failure::NoResponse`].
    pub fn status_should_be(&self, expected: u16) -> Result<(), Error> {
        expect_status(self.last_response()?, expected)
    }

    /// The last response has a property, optionally bound to a namespace.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::MissingProperty`] if it does not.
    pub fn response_should_contain_property(
        &self,
        property: &str,
        namespace: Option<&str>,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        let namespaces = self.namespaces_with(namespace)?;
        check::find_property(&doc, &namespaces, &PropertyAddress::parse(property)?)?;
        Ok(())
    }

    /// The property of the single response matches `expected` or
    /// `alternative` as anchored patterns.
    ///
    /// `expected` is substituted for `user`, or the current user.
    ///
    /// # Errors
    ///
    /// Fails if the property is missing or matches neither.
    pub fn single_response_should_contain_property_with_value(
        &self,
        property: &str,
        expected: &str,
        alternative: Option<&str>,
        user: Option<&str>,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        let expected = self.substitutions(user).apply(expected);
        check::property_matches(
            &doc,
            &self.namespaces,
            &PropertyAddress::parse(property)?,
            &expected,
            alternative.unwrap_or(&expected),
        )?;
        Ok(())
    }

    /// The property of the single response matches a regular expression.
    ///
    /// # Errors
    ///
    /// Fails if the property is missing or does not match.
    pub fn single_response_should_contain_property_like(
        &self,
        property: &str,
        pattern: &str,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        let address = PropertyAddress::parse(property)?;
        check::property_value_like(&doc, &self.namespaces, &address, pattern)?;
        Ok(())
    }

    /// A custom property has exactly `value`, with `\"` read as `"`.
    ///
    /// # Errors
    ///
    /// Fails if the property is missing or has another value.
    pub fn response_should_contain_custom_property(
        &self,
        property: &str,
        namespace: Option<&str>,
        value: &str,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        let namespaces = self.namespaces_with(namespace)?;
        let address = PropertyAddress::parse(property)?;
        check::custom_property_value(&doc, &namespaces, &address, value)?;
        Ok(())
    }

    /// The single response has a property with (or without) a child.
    ///
    /// # Errors
    ///
    /// Fails if the child presence differs.
    pub fn single_response_property_child(
        &self,
        property: &str,
        child: &str,
        present: bool,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        let address = PropertyAddress::parse(property)?;
        check::child_property(&doc, &self.namespaces, &address, child, present)?;
        Ok(())
    }

    /// The response has exactly one such property and it is empty.
    ///
    /// # Errors
    ///
    /// Fails if it is missing, repeated or has content.
    pub fn response_should_contain_empty_property(&self, property: &str) -> Result<(), Error> {
        let doc = self.document()?;
        let address = PropertyAddress::parse(property)?;
        check::empty_property(&doc, &self.namespaces, &address)?;
        Ok(())
    }

    /// `oc:share-types` lists every share type of a one-column table.
    ///
    /// The table has no header; every row is a share type.
    ///
    /// # Errors
    ///
    /// Fails on a malformed table or a missing share type.
    pub fn response_should_contain_share_types(&self, share_types: &Table) -> Result<(), Error> {
        share_types.verify_column_count(1)?;
        let expected: Vec<&str> = std::iter::once(share_types.header())
            .chain(share_types.rows().iter().map(Vec::as_slice))
            .filter_map(|row| row.first().map(String::as_str))
            .collect();
        let doc = self.document()?;
        check::share_types(&doc, &self.namespaces, &expected)?;
        Ok(())
    }

    /// The item at `path` equals `expected`, substituted for `user`.
    ///
    /// # Errors
    ///
    /// Fails if the item is missing or differs.
    pub fn item_value_should_be(
        &self,
        path: &str,
        user: Option<&str>,
        expected: &str,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        let expected = self.substitutions(user).apply(expected);
        check::item_value(&doc, &self.namespaces, path, &expected)?;
        Ok(())
    }

    /// The item equals either value; an empty second value repeats the first.
    ///
    /// # Errors
    ///
    /// Fails if the item is missing or equals neither.
    pub fn item_value_should_be_either(
        &self,
        path: &str,
        user: Option<&str>,
        first: &str,
        second: &str,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        let subs = self.substitutions(user);
        let first = subs.apply(first);
        let second = if second.is_empty() {
            first.clone()
        } else {
            subs.apply(second)
        };
        check::item_value_one_of(&doc, &self.namespaces, path, &[first.as_str(), second.as_str()])?;
        Ok(())
    }

    /// The item `path` under the propstat of the entry for `entry` equals
    /// `expected`.
    ///
    /// # Errors
    ///
    /// Fails if the entry or item is missing or differs.
    pub fn item_value_of_entry_should_be(
        &self,
        user: &str,
        path: &str,
        entry: &str,
        expected: &str,
    ) -> Result<(), Error> {
        let entry = self.substitutions(Some(user)).apply(entry);
        let href = format!(
            "/{}",
            self.config.server.prefix_root(entry.trim_start_matches('/'))
        );
        let full = format!("//d:response/d:href[.='{href}']/following-sibling::d:propstat{path}");
        self.item_value_should_be(&full, None, expected)
    }

    /// The item at `path` matches a regular expression.
    ///
    /// For `d:href` items the pattern is re-rooted at the DAV root.
    /// Substituted values, `%public_token%` included, are regex-quoted.
    ///
    /// # Errors
    ///
    /// Fails if the item is missing or does not match.
    pub fn item_should_match(
        &self,
        path: &str,
        pattern: &str,
        user: Option<&str>,
    ) -> Result<(), Error> {
        let doc = self.document()?;
        self.match_item(&doc, path, pattern, user)
    }

    /// Nothing matches `path`.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::UnexpectedNode`].
    pub fn item_should_not_exist(&self, path: &str) -> Result<(), Error> {
        let doc = self.document()?;
        check::item_absent(&doc, &self.namespaces, path)?;
        Ok(())
    }

    /// Some entry of the last response has an href ending in `expected`.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::NoMatchingHref`].
    pub fn entry_with_href_should_exist(&self, expected: &str, user: &str) -> Result<(), Error> {
        let doc = self.document()?;
        let user = self.actors.actual_username(user);
        let expected = self.substitutions(Some(user.as_str())).apply_quoted(expected);
        let expected = self.config.server.prefix_root(&expected);
        let spaces = self.config.server.dav_path_version == DavPathVersion::Spaces;
        check::entry_with_href(&doc, &expected, spaces, &user)?;
        Ok(())
    }

    /// Each `(resource, propertyName, propertyValue)` row holds in the last
    /// response.
    ///
    /// # Errors
    ///
    /// Fails on a malformed table or the first differing value.
    pub fn response_should_have_properties(&self, user: &str, table: &Table) -> Result<(), Error> {
        table.verify_columns(&["resource", "propertyName", "propertyValue"], &[])?;
        let user = self.actors.actual_username(user);
        let rows: Vec<EntryProperty> = table
            .column_hash()
            .into_iter()
            .map(|r| EntryProperty {
                resource: r["resource"].to_string(),
                property: r["propertyName"].to_string(),
                value: r["propertyValue"].to_string(),
            })
            .collect();
        tracing::debug!(user, rows = rows.len(), "checking entry properties");
        let doc = self.document()?;
        check::entries_have_properties(&doc, &self.namespaces, &rows)?;
        Ok(())
    }

    /// The last response carries a valid etag.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::InvalidEtag`].
    pub fn response_should_contain_etag(&self) -> Result<(), Error> {
        let etag = self.last_response()?.multistatus()?.first_etag();
        match etag {
            Some(etag) if etag.is_valid() => Ok(()),
            other => Err(Failure::InvalidEtag(other.map(|e| e.to_string())).into()),
        }
    }

    // ---------------------------------------------------------------------
    // Checks that query first
    // ---------------------------------------------------------------------

    /// Queries one property of an entry and checks its value against
    /// `expected` or `alternative`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails, or as
    /// [`Self::single_response_should_contain_property_with_value`].
    pub async fn entry_should_contain_property(
        &self,
        user: &str,
        path: &str,
        property: &str,
        expected: &str,
        alternative: Option<&str>,
        space_id: Option<&str>,
    ) -> Result<(), Error> {
        let response = self
            .list(user, path, Depth::Zero, &[property], None, space_id)
            .await?;
        let doc = response.xml()?;
        let expected = self.substitutions(Some(user)).apply(expected);
        check::property_matches(
            &doc,
            &self.namespaces,
            &PropertyAddress::parse(property)?,
            &expected,
            alternative.unwrap_or(&expected),
        )?;
        Ok(())
    }

    /// Queries `d:lockdiscovery` of an entry as `user` and matches an item
    /// of it.
    ///
    /// # Errors
    ///
    /// Fails unless the query returns 207 and the item matches.
    pub async fn lock_discovery_should_match(
        &self,
        user: &str,
        path: &str,
        item: &str,
        pattern: &str,
    ) -> Result<(), Error> {
        let response = self
            .list(user, path, Depth::One, &[LOCKDISCOVERY], None, None)
            .await?;
        expect_status(&response, 207)?;
        self.match_item(&response.xml()?, item, pattern, Some(user))
    }

    /// Queries `d:lockdiscovery` of an entry of the last public link and
    /// matches an item of it.
    ///
    /// # Errors
    ///
    /// Fails unless the query returns 207 and the item matches.
    pub async fn public_lock_discovery_should_match(
        &self,
        path: &str,
        item: &str,
        pattern: &str,
    ) -> Result<(), Error> {
        let response = self.list_public(path, &[LOCKDISCOVERY]).await?;
        expect_status(&response, 207)?;
        self.match_item(&response.xml()?, item, pattern, None)
    }

    // ---------------------------------------------------------------------
    // Etags
    // ---------------------------------------------------------------------

    /// Stores the current etag of `path` under `store_path`, or `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or has no etag.
    pub async fn store_etag(
        &mut self,
        user: &str,
        path: &str,
        store_path: Option<&str>,
        space_id: Option<&str>,
    ) -> Result<ETag, Error> {
        let user = self.actors.actual_username(user);
        let etag = self.current_etag(&user, path, space_id).await?;
        let key = store_path.filter(|p| !p.is_empty()).unwrap_or(path);
        self.etags.store(&user, key, etag.clone());
        Ok(etag)
    }

    /// Stores the current etag, which must be non-empty.
    ///
    /// # Errors
    ///
    /// As [`Self::store_etag`], or [`Failure::EmptyStoredEtag`].
    pub async fn has_stored_etag(
        &mut self,
        user: &str,
        path: &str,
        store_path: Option<&str>,
    ) -> Result<(), Error> {
        self.store_etag(user, path, store_path, None).await?;
        let user = self.actors.actual_username(user);
        let key = store_path.filter(|p| !p.is_empty()).unwrap_or(path);
        self.etags.get_non_empty(&user, key)?;
        Ok(())
    }

    /// Compares the current etag of `path` with the stored one.
    ///
    /// # Errors
    ///
    /// Fails if nothing is stored or the expectation does not hold.
    pub async fn etag_should_have_changed(
        &self,
        path: &str,
        user: &str,
        expectation: EtagExpectation,
    ) -> Result<(), Error> {
        let user = self.actors.actual_username(user);
        let current = self.current_etag(&user, path, None).await?;
        self.etags.check(&user, path, &current, expectation)?;
        Ok(())
    }

    /// Compares the etags of a `user`/`path` table, reporting all violations
    /// together.
    ///
    /// # Errors
    ///
    /// Fails on a malformed table, a missing stored etag, or with
    /// [`Failure::EtagViolations`].
    pub async fn etags_should_have_changed(
        &self,
        table: &Table,
        expectation: EtagExpectation,
    ) -> Result<(), Error> {
        table.verify_columns(&["user", "path"], &[])?;
        table.verify_column_count(2)?;

        let mut current = Vec::new();
        for row in table.column_hash() {
            let user = self.actors.actual_username(row["user"]);
            let etag = self.current_etag(&user, row["path"], None).await?;
            current.push((user, row["path"].to_string(), etag));
        }

        self.etags.check_all(
            current
                .iter()
                .map(|(user, path, etag)| (user.as_str(), path.as_str(), etag)),
            expectation,
        )?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn current_user(&self) -> Result<String, Error> {
        self.current_user
            .clone()
            .ok_or_else(|| Error::Config("no current user".to_string()))
    }

    fn document(&self) -> Result<Document, Error> {
        Ok(self.last_response()?.xml()?)
    }

    fn namespaces_with(&self, namespace: Option<&str>) -> Result<Namespaces, Error> {
        Ok(match parse_namespace(namespace)? {
            Some(ns) => self.namespaces.clone().with(&ns),
            None => self.namespaces.clone(),
        })
    }

    fn substitutions(&self, user: Option<&str>) -> Substitutions {
        let user = user
            .map(str::to_string)
            .or_else(|| self.current_user.clone())
            .unwrap_or_default();
        let subs = self.actors.substitutions(&user, &self.config);
        match self.shares.current() {
            Some(token) => subs.set(substitute::PUBLIC_TOKEN, token),
            None => subs,
        }
    }

    fn match_item(
        &self,
        doc: &Document,
        path: &str,
        pattern: &str,
        user: Option<&str>,
    ) -> Result<(), Error> {
        let pattern = if path.ends_with("d:href") {
            check::reroot_href_pattern(pattern, self.config.server.dav_root())
        } else {
            pattern.to_string()
        };
        let pattern = self.substitutions(user).apply_quoted(&pattern);
        check::item_matches(doc, &self.namespaces, path, &pattern)?;
        Ok(())
    }

    /// The space id to use for `user`, an explicit one winning.
    fn space_for(&self, user: &str, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.actors.space_id(user))
    }

    async fn properties_of(
        &self,
        user: &str,
        path: &str,
        space_id: Option<&str>,
        properties: &Table,
    ) -> Result<DavResponse, Error> {
        properties.verify_columns(&["propertyName"], &[])?;
        properties.verify_column_count(1)?;
        let names = property_column(properties)?;
        self.list(user, path, Depth::One, &names, None, space_id)
            .await
    }

    async fn list<S: AsRef<str>>(
        &self,
        user: &str,
        path: &str,
        depth: Depth,
        properties: &[S],
        namespace: Option<&Namespace>,
        space_id: Option<&str>,
    ) -> Result<DavResponse, Error> {
        let actor = self.actors.actor(user)?;
        let query = PropertyQuery::new(actor, path)
            .depth(depth)
            .properties(prop_names(properties, namespace)?)
            .space_id(self.space_for(user, space_id));
        Ok(self.client.propfind(&query).await?)
    }

    async fn list_public<S: AsRef<str>>(
        &self,
        path: &str,
        properties: &[S],
    ) -> Result<DavResponse, Error> {
        let actor = self
            .shares
            .actor()
            .ok_or_else(|| Error::Config("no public link has been created".to_string()))?;
        let query = PropertyQuery::new(actor, path)
            .depth(Depth::Zero)
            .properties(prop_names(properties, None)?);
        Ok(self.client.propfind(&query).await?)
    }

    async fn patch(
        &self,
        user: &str,
        path: &str,
        properties: &[(&str, &str)],
        namespace: Option<&str>,
    ) -> Result<DavResponse, Error> {
        let namespace = parse_namespace(namespace)?;
        let mut request = PropPatchRequest::new();
        for (name, value) in properties {
            let name = match &namespace {
                Some(ns) => PropName::with_namespace(name, ns)?,
                None => PropName::parse(name)?,
            };
            request.set(name, *value);
        }

        let actor: Actor = self.actors.actor(user)?;
        let space_id = self.space_for(user, None);
        Ok(self
            .client
            .proppatch(&actor, path, space_id.as_deref(), &request)
            .await?)
    }

    async fn current_etag(
        &self,
        user: &str,
        path: &str,
        space_id: Option<&str>,
    ) -> Result<ETag, Error> {
        let response = self
            .list(user, path, Depth::One, &[GETETAG], None, space_id)
            .await?;
        response.multistatus()?.first_etag().ok_or_else(|| {
            Failure::MissingProperty {
                property: GETETAG.to_string(),
            }
            .into()
        })
    }
}

fn property_column(table: &Table) -> Result<Vec<String>, Failure> {
    Ok(table
        .column("propertyName")?
        .into_iter()
        .map(str::to_string)
        .collect())
}

fn parse_namespace(namespace: Option<&str>) -> Result<Option<Namespace>, Error> {
    namespace
        .map(str::parse::<Namespace>)
        .transpose()
        .map_err(Error::from)
}

fn expect_status(response: &DavResponse, expected: u16) -> Result<(), Error> {
    let actual = response.status.as_u16();
    if actual == expected {
        Ok(())
    } else {
        tracing::debug!(actual, expected, body = %response.body, "unexpected status");
        Err(Failure::Status { expected, actual }.into())
    }
}
