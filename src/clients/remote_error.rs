//! Error documents returned by the service.
//!
//! A failed request answers with a document of the form
//! `<Errors><Error><Code>AWS.InvalidParameterValue</Code><Message>…</Message></Error></Errors>`,
//! sometimes nested inside an otherwise normal response. Only the first
//! `<Error>` is consulted; the part of its code after the last `.` selects
//! the [`RemoteErrorKind`].

use std::fmt;

use thiserror::Error;

use crate::markup::MarkupNode;

/// The closed set of error kinds the service reports.
///
/// Codes outside the table map to [`RemoteErrorKind::Unknown`]; the raw code
/// is still available on [`RemoteError::code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    /// A parameter must be given exactly once.
    ExactParameterRequirement,
    /// Too many values were given for a parameter.
    ExceededMaximumParameterValues,
    /// Too few values were given for a parameter.
    InsufficientParameterValues,
    /// The service failed internally.
    InternalError,
    /// A parameter value is not one of its enumerated values.
    InvalidEnumeratedParameter,
    /// A timestamp is not valid ISO 8601.
    InvalidISO8601Time,
    /// The operation is not available in this marketplace.
    InvalidOperationForMarketplace,
    /// The operation name is not valid.
    InvalidOperationParameter,
    /// The parameters cannot be combined.
    InvalidParameterCombination,
    /// A parameter value is not valid, including a bad license key.
    InvalidParameterValue,
    /// A requested response group does not exist for the operation.
    InvalidResponseGroup,
    /// The service name is not valid.
    InvalidServiceParameter,
    /// The subscription or license key is not valid.
    InvalidSubscriptionId,
    /// The XSLT stylesheet address is not valid.
    InvalidXSLTAddress,
    /// A parameter was given more than its maximum number of times.
    MaximumParameterRequirement,
    /// A parameter was given fewer than its minimum number of times.
    MinimumParameterRequirement,
    /// The operation parameter is missing.
    MissingOperationParameter,
    /// A required parameter combination is missing.
    MissingParameterCombination,
    /// Required parameters are missing.
    MissingParameters,
    /// A parameter requires a value combination that was not given.
    MissingParameterValueCombination,
    /// The service parameter is missing.
    MissingServiceParameter,
    /// A parameter value is outside its range, e.g. an item page past the end.
    ParameterOutOfRange,
    /// A parameter was repeated.
    ParameterRepeatedInRequest,
    /// The parameter values cannot be combined.
    RestrictedParameterValueCombination,
    /// The XSLT stylesheet failed to apply.
    XSLTTransformationError,
    /// The search matched nothing.
    NoExactMatches,
    /// The cart id, HMAC and associate tag do not belong together.
    CartInfoMismatch,
    /// An item cannot be added to a cart.
    ItemNotAccessible,
    /// A code with no entry in the table.
    Unknown,
}

impl RemoteErrorKind {
    const KNOWN: [Self; 28] = [
        Self::ExactParameterRequirement,
        Self::ExceededMaximumParameterValues,
        Self::InsufficientParameterValues,
        Self::InternalError,
        Self::InvalidEnumeratedParameter,
        Self::InvalidISO8601Time,
        Self::InvalidOperationForMarketplace,
        Self::InvalidOperationParameter,
        Self::InvalidParameterCombination,
        Self::InvalidParameterValue,
        Self::InvalidResponseGroup,
        Self::InvalidServiceParameter,
        Self::InvalidSubscriptionId,
        Self::InvalidXSLTAddress,
        Self::MaximumParameterRequirement,
        Self::MinimumParameterRequirement,
        Self::MissingOperationParameter,
        Self::MissingParameterCombination,
        Self::MissingParameters,
        Self::MissingParameterValueCombination,
        Self::MissingServiceParameter,
        Self::ParameterOutOfRange,
        Self::ParameterRepeatedInRequest,
        Self::RestrictedParameterValueCombination,
        Self::XSLTTransformationError,
        Self::NoExactMatches,
        Self::CartInfoMismatch,
        Self::ItemNotAccessible,
    ];

    /// Maps a service error code to its kind.
    ///
    /// Only the part after the last `.` is compared, so
    /// `AWS.ECommerceService.NoExactMatches` and `NoExactMatches` map alike.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ecs_api::RemoteErrorKind;
    ///
    /// assert_eq!(
    ///     RemoteErrorKind::from_code("AWS.MissingParameters"),
    ///     RemoteErrorKind::MissingParameters
    /// );
    /// assert_eq!(RemoteErrorKind::from_code("AWS.SomethingNew"), RemoteErrorKind::Unknown);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let suffix = code.trim().rsplit('.').next().unwrap_or_default();
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.as_str() == suffix)
            .unwrap_or(Self::Unknown)
    }

    /// Returns the code suffix this kind is selected by.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactParameterRequirement => "ExactParameterRequirement",
            Self::ExceededMaximumParameterValues => "ExceededMaximumParameterValues",
            Self::InsufficientParameterValues => "InsufficientParameterValues",
            Self::InternalError => "InternalError",
            Self::InvalidEnumeratedParameter => "InvalidEnumeratedParameter",
            Self::InvalidISO8601Time => "InvalidISO8601Time",
            Self::InvalidOperationForMarketplace => "InvalidOperationForMarketplace",
            Self::InvalidOperationParameter => "InvalidOperationParameter",
            Self::InvalidParameterCombination => "InvalidParameterCombination",
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::InvalidResponseGroup => "InvalidResponseGroup",
            Self::InvalidServiceParameter => "InvalidServiceParameter",
            Self::InvalidSubscriptionId => "InvalidSubscriptionId",
            Self::InvalidXSLTAddress => "InvalidXSLTAddress",
            Self::MaximumParameterRequirement => "MaximumParameterRequirement",
            Self::MinimumParameterRequirement => "MinimumParameterRequirement",
            Self::MissingOperationParameter => "MissingOperationParameter",
            Self::MissingParameterCombination => "MissingParameterCombination",
            Self::MissingParameters => "MissingParameters",
            Self::MissingParameterValueCombination => "MissingParameterValueCombination",
            Self::MissingServiceParameter => "MissingServiceParameter",
            Self::ParameterOutOfRange => "ParameterOutOfRange",
            Self::ParameterRepeatedInRequest => "ParameterRepeatedInRequest",
            Self::RestrictedParameterValueCombination => "RestrictedParameterValueCombination",
            Self::XSLTTransformationError => "XSLTTransformationError",
            Self::NoExactMatches => "NoExactMatches",
            Self::CartInfoMismatch => "CartInfoMismatch",
            Self::ItemNotAccessible => "ItemNotAccessible",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error reported by the service in an error document.
///
/// # Example
///
/// ```rust
/// use ecs_api::{markup, RemoteError, RemoteErrorKind};
///
/// let document = markup::parse(
///     "<ItemSearchErrorResponse><Error><Code>AWS.ParameterOutOfRange</Code>\
///      <Message>The value you specified for ItemPage is invalid.</Message></Error></ItemSearchErrorResponse>",
/// )
/// .unwrap();
///
/// let error = RemoteError::from_document(&document).unwrap();
/// assert_eq!(error.kind, RemoteErrorKind::ParameterOutOfRange);
/// assert_eq!(error.code, "AWS.ParameterOutOfRange");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct RemoteError {
    /// The kind selected by the code suffix.
    pub kind: RemoteErrorKind,
    /// The full code as sent by the service.
    pub code: String,
    /// The human-readable message, empty if the service sent none.
    pub message: String,
}

impl RemoteError {
    /// Extracts the first error from a document.
    ///
    /// Only an `<Error>` element with a `<Code>` child counts. Returns `None`
    /// if the document contains no such element.
    #[must_use]
    pub fn from_document(document: &MarkupNode) -> Option<Self> {
        let error = document.find_where(&is_coded_error)?;
        let code = error
            .child("Code")
            .map(|code| code.text().trim().to_string())
            .unwrap_or_default();
        let message = error
            .child("Message")
            .map(|message| message.text().trim().to_string())
            .unwrap_or_default();

        Some(Self {
            kind: RemoteErrorKind::from_code(&code),
            code,
            message,
        })
    }
}

fn is_coded_error(node: &MarkupNode) -> bool {
    node.tag() == "Error" && node.child("Code").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse;

    #[test]
    fn test_every_known_kind_round_trips_through_its_code() {
        for kind in RemoteErrorKind::KNOWN {
            assert_eq!(RemoteErrorKind::from_code(&format!("AWS.{kind}")), kind);
        }
    }

    #[test]
    fn test_code_suffix_after_last_dot_selects_kind() {
        assert_eq!(
            RemoteErrorKind::from_code("AWS.ECommerceService.NoExactMatches"),
            RemoteErrorKind::NoExactMatches
        );
        assert_eq!(
            RemoteErrorKind::from_code("InvalidParameterValue"),
            RemoteErrorKind::InvalidParameterValue
        );
    }

    #[test]
    fn test_unmapped_codes_are_unknown() {
        assert_eq!(RemoteErrorKind::from_code("AWS.Whatever"), RemoteErrorKind::Unknown);
        assert_eq!(RemoteErrorKind::from_code(""), RemoteErrorKind::Unknown);
        assert_eq!(RemoteErrorKind::from_code("AWS."), RemoteErrorKind::Unknown);
    }

    #[test]
    fn test_only_first_error_is_consulted() {
        let document = parse(
            "<Errors>\
               <Error><Code>AWS.MissingParameters</Code><Message>first</Message></Error>\
               <Error><Code>AWS.InternalError</Code><Message>second</Message></Error>\
             </Errors>",
        )
        .unwrap();
        let error = RemoteError::from_document(&document).unwrap();
        assert_eq!(error.kind, RemoteErrorKind::MissingParameters);
        assert_eq!(error.message, "first");
        assert_eq!(error.to_string(), "AWS.MissingParameters: first");
    }

    #[test]
    fn test_error_nested_in_response_is_found() {
        let document = parse(
            "<ItemLookupResponse><Items><Request><IsValid>False</IsValid>\
             <Errors><Error><Code>AWS.InvalidParameterValue</Code>\
             <Message>0596002818 is not a valid value for ItemId.</Message></Error></Errors>\
             </Request></Items></ItemLookupResponse>",
        )
        .unwrap();
        let error = RemoteError::from_document(&document).unwrap();
        assert_eq!(error.kind, RemoteErrorKind::InvalidParameterValue);
    }

    #[test]
    fn test_success_document_has_no_error() {
        let document = parse("<ItemLookupResponse><Items/></ItemLookupResponse>").unwrap();
        assert!(RemoteError::from_document(&document).is_none());
    }

    #[test]
    fn test_error_element_without_code_is_data() {
        let document = parse(
            "<ItemLookupResponse><Items><Item><ASIN>X</ASIN><Error>none</Error></Item></Items>\
             </ItemLookupResponse>",
        )
        .unwrap();
        assert!(RemoteError::from_document(&document).is_none());
    }

    #[test]
    fn test_coded_error_found_after_codeless_one() {
        let document = parse(
            "<CartGetResponse><Cart><Error>note</Error></Cart><Errors><Error>\
             <Code>AWS.ECommerceService.CartInfoMismatch</Code><Message>m</Message>\
             </Error></Errors></CartGetResponse>",
        )
        .unwrap();
        let error = RemoteError::from_document(&document).unwrap();
        assert_eq!(error.kind, RemoteErrorKind::CartInfoMismatch);
    }
}
