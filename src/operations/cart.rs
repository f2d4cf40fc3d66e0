//! Remote shopping carts: `CartCreate`, `CartAdd`, `CartGet`, `CartClear`.
//!
//! A cart lives on the service and is addressed by its `CartId` and `HMAC`.
//! Every cart operation answers with the full `<Cart>` element, returned
//! here as an [`ObjectGraph`] whose `CartItems` and `SavedForLaterItems`
//! fields are lists. [`CartHandle::from_cart`] extracts the identifiers
//! needed for the next call.

use std::sync::{Arc, OnceLock};

use crate::clients::{Query, QueryBuilder};
use crate::error::EcsError;
use crate::operations::{take_object, EcsClient};
use crate::unmarshal::{ObjectGraph, TransformRules};

fn rules() -> &'static Arc<TransformRules> {
    static RULES: OnceLock<Arc<TransformRules>> = OnceLock::new();
    RULES.get_or_init(|| {
        Arc::new(
            TransformRules::builder()
                .bypassed(["OperationRequest", "Request"])
                .collective(["CartItems", "SavedForLaterItems"])
                .collected(["CartItem", "SavedForLaterItem"])
                .build(),
        )
    })
}

/// An item and quantity to put in a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// The item's ASIN.
    pub asin: String,
    /// How many to add.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart item.
    #[must_use]
    pub fn new(asin: impl Into<String>, quantity: u32) -> Self {
        Self {
            asin: asin.into(),
            quantity,
        }
    }
}

/// Identifies an existing remote cart.
///
/// # Example
///
/// ```rust,no_run
/// use ecs_api::{CartHandle, CartItem};
///
/// # async fn run(client: ecs_api::EcsClient) -> Result<(), ecs_api::EcsError> {
/// let cart = client.cart_create(&[CartItem::new("0596009259", 1)]).await?;
/// let handle = CartHandle::from_cart(&cart)?;
///
/// let cart = client.cart_add(&handle, &[CartItem::new("0596100469", 2)]).await?;
/// println!("{}", cart.list("CartItems")?.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CartHandle {
    cart_id: String,
    hmac: String,
}

impl CartHandle {
    /// Creates a handle from a cart id and HMAC.
    #[must_use]
    pub fn new(cart_id: impl Into<String>, hmac: impl Into<String>) -> Self {
        Self {
            cart_id: cart_id.into(),
            hmac: hmac.into(),
        }
    }

    /// Reads `CartId` and `HMAC` from a cart returned by a cart operation.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::FieldNotFound`] or [`EcsError::UnexpectedShape`]
    /// if either field is missing or not text.
    pub fn from_cart(cart: &ObjectGraph) -> Result<Self, EcsError> {
        Ok(Self::new(cart.text("CartId")?, cart.text("HMAC")?))
    }

    /// Returns the cart id.
    #[must_use]
    pub fn cart_id(&self) -> &str {
        &self.cart_id
    }

    fn apply(&self, builder: QueryBuilder) -> QueryBuilder {
        builder
            .param("CartId", self.cart_id.as_str())
            .param("HMAC", self.hmac.as_str())
    }
}

impl std::fmt::Debug for CartHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartHandle")
            .field("cart_id", &self.cart_id)
            .field("hmac", &"*****")
            .finish()
    }
}

fn with_items(mut builder: QueryBuilder, items: &[CartItem]) -> QueryBuilder {
    for (n, item) in items.iter().enumerate() {
        let n = n + 1;
        builder = builder
            .param(format!("Item.{n}.ASIN"), item.asin.as_str())
            .param(format!("Item.{n}.Quantity"), item.quantity.to_string());
    }
    builder
}

impl EcsClient {
    /// Creates a remote cart holding `items`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] if an item cannot be added, or any
    /// transport error.
    pub async fn cart_create(&self, items: &[CartItem]) -> Result<ObjectGraph, EcsError> {
        let query = with_items(Query::builder("CartCreate"), items).build()?;
        self.send_cart(&query).await
    }

    /// Adds `items` to an existing cart.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] for an unknown cart or item, or any
    /// transport error.
    pub async fn cart_add(
        &self,
        cart: &CartHandle,
        items: &[CartItem],
    ) -> Result<ObjectGraph, EcsError> {
        let query = with_items(cart.apply(Query::builder("CartAdd")), items).build()?;
        self.send_cart(&query).await
    }

    /// Fetches the current contents of a cart.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] for an unknown cart, or any transport
    /// error.
    pub async fn cart_get(&self, cart: &CartHandle) -> Result<ObjectGraph, EcsError> {
        let query = cart.apply(Query::builder("CartGet")).build()?;
        self.send_cart(&query).await
    }

    /// Removes every item from a cart.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] for an unknown cart, or any transport
    /// error.
    pub async fn cart_clear(&self, cart: &CartHandle) -> Result<ObjectGraph, EcsError> {
        let query = cart.apply(Query::builder("CartClear")).build()?;
        self.send_cart(&query).await
    }

    async fn send_cart(&self, query: &Query) -> Result<ObjectGraph, EcsError> {
        let mut response = self.execute(query, rules()).await?;
        take_object(&mut response, "Cart")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{RemoteError, RemoteErrorKind};
    use crate::operations::test_support::client;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CART: &str = "<CartAddResponse><OperationRequest><RequestId>r</RequestId></OperationRequest>\
        <Cart><Request><IsValid>True</IsValid></Request>\
        <CartId>102-1234567</CartId><HMAC>Xyz+abc=</HMAC>\
        <PurchaseURL>https://www.amazon.com/gp/cart/aws-merge.html</PurchaseURL>\
        <CartItems><SubTotal><FormattedPrice>$79.97</FormattedPrice></SubTotal>\
        <CartItem><CartItemId>U1</CartItemId><ASIN>0596009259</ASIN><Quantity>1</Quantity></CartItem>\
        <CartItem><CartItemId>U2</CartItemId><ASIN>0596100469</ASIN><Quantity>2</Quantity></CartItem>\
        </CartItems></Cart></CartAddResponse>";

    #[tokio::test]
    async fn test_cart_add_sends_numbered_items_and_handle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Operation", "CartAdd"))
            .and(query_param("CartId", "102-1234567"))
            .and(query_param("HMAC", "Xyz+abc="))
            .and(query_param("Item.1.ASIN", "0596100469"))
            .and(query_param("Item.1.Quantity", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CART))
            .expect(1)
            .mount(&server)
            .await;

        let handle = CartHandle::new("102-1234567", "Xyz+abc=");
        let cart = client(&server)
            .cart_add(&handle, &[CartItem::new("0596100469", 2)])
            .await
            .unwrap();

        assert!(!cart.contains("Request"));
        assert_eq!(CartHandle::from_cart(&cart).unwrap(), handle);

        let items = cart.list("CartItems").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items.fields().object("SubTotal").unwrap().text("FormattedPrice").unwrap(),
            "$79.97"
        );
        assert_eq!(items[1].as_object().unwrap().text("Quantity").unwrap(), "2");
    }

    #[tokio::test]
    async fn test_cart_clear_returns_empty_cart() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Operation", "CartClear"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<CartClearResponse><Cart><CartId>102-1234567</CartId><HMAC>h</HMAC></Cart></CartClearResponse>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let cart = client(&server)
            .cart_clear(&CartHandle::new("102-1234567", "h"))
            .await
            .unwrap();
        assert!(matches!(cart.list("CartItems"), Err(EcsError::FieldNotFound { .. })));
    }

    #[tokio::test]
    async fn test_cart_get_unknown_cart_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<CartGetResponse><Cart><Request><Errors><Error>\
                 <Code>AWS.ECommerceService.CartInfoMismatch</Code>\
                 <Message>Your request contains an invalid AssociateTag, CartId and HMAC combination.</Message>\
                 </Error></Errors></Request></Cart></CartGetResponse>",
            ))
            .mount(&server)
            .await;

        let error = client(&server)
            .cart_get(&CartHandle::new("bad", "bad"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            EcsError::Remote(RemoteError { kind: RemoteErrorKind::CartInfoMismatch, .. })
        ));
    }

    #[test]
    fn test_handle_debug_hides_hmac() {
        let handle = CartHandle::new("102-1234567", "secret");
        let debug = format!("{handle:?}");
        assert!(debug.contains("102-1234567"));
        assert!(!debug.contains("secret"));
    }
}
