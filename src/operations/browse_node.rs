//! `BrowseNodeLookup`.

use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::clients::Query;
use crate::error::EcsError;
use crate::operations::params::to_query_args;
use crate::operations::{take_list, EcsClient};
use crate::unmarshal::{ItemList, TransformRules};

fn rules() -> &'static Arc<TransformRules> {
    static RULES: OnceLock<Arc<TransformRules>> = OnceLock::new();
    RULES.get_or_init(|| {
        Arc::new(
            TransformRules::builder()
                .bypassed(["OperationRequest"])
                .collective(["BrowseNodes", "Children", "Ancestors", "TopSellers"])
                .collected(["BrowseNode", "TopSeller"])
                .build(),
        )
    })
}

/// Parameters for `BrowseNodeLookup`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct BrowseNodeLookupParams {
    /// Browse node identifiers.
    pub browse_node_id: Vec<String>,

    /// Response groups such as `BrowseNodeInfo` or `TopSellers`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_group: Vec<String>,
}

impl EcsClient {
    /// Looks up a browse node with its children and ancestors.
    ///
    /// Each returned node has `Children` and `Ancestors` lists when the
    /// service includes them.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Remote`] for an unknown node, or any transport
    /// error.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: ecs_api::EcsClient) -> Result<(), ecs_api::EcsError> {
    /// let nodes = client.browse_node_lookup("3839").await?;
    /// let node = nodes[0].as_object().unwrap();
    /// for child in node.list("Children")?.iter() {
    ///     println!("{}", child.as_object().unwrap().text("Name")?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn browse_node_lookup(&self, browse_node_id: &str) -> Result<ItemList, EcsError> {
        self.browse_node_lookup_with(BrowseNodeLookupParams {
            browse_node_id: vec![browse_node_id.to_string()],
            ..Default::default()
        })
        .await
    }

    /// Sends `BrowseNodeLookup` with full parameters.
    ///
    /// # Errors
    ///
    /// See [`browse_node_lookup`](Self::browse_node_lookup).
    pub async fn browse_node_lookup_with(
        &self,
        params: BrowseNodeLookupParams,
    ) -> Result<ItemList, EcsError> {
        let query = Query::builder("BrowseNodeLookup")
            .params(to_query_args(&params)?)
            .build()?;
        let mut response = self.execute(&query, rules()).await?;
        take_list(&mut response, "BrowseNodes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::test_support::client;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_browse_node_lookup_builds_tree() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Operation", "BrowseNodeLookup"))
            .and(query_param("BrowseNodeId", "3839"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<BrowseNodeLookupResponse><OperationRequest><RequestId>r</RequestId></OperationRequest>\
                 <BrowseNodes><Request><IsValid>True</IsValid></Request>\
                 <BrowseNode><BrowseNodeId>3839</BrowseNodeId><Name>Python</Name>\
                 <Children><BrowseNode><BrowseNodeId>285856</BrowseNodeId><Name>Tk</Name></BrowseNode></Children>\
                 <Ancestors><BrowseNode><BrowseNodeId>3952</BrowseNodeId><Name>Languages</Name></BrowseNode></Ancestors>\
                 </BrowseNode></BrowseNodes></BrowseNodeLookupResponse>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let nodes = client(&server).browse_node_lookup("3839").await.unwrap();
        assert_eq!(nodes.len(), 1);

        let node = nodes[0].as_object().unwrap();
        assert_eq!(node.text("Name").unwrap(), "Python");
        let children = node.list("Children").unwrap();
        assert_eq!(children[0].as_object().unwrap().text("Name").unwrap(), "Tk");
        let ancestors = node.list("Ancestors").unwrap();
        assert_eq!(
            ancestors[0].as_object().unwrap().text("BrowseNodeId").unwrap(),
            "3952"
        );
    }

    #[test]
    fn test_params_join_node_ids() {
        let args = to_query_args(&BrowseNodeLookupParams {
            browse_node_id: vec!["3839".to_string(), "3952".to_string()],
            response_group: Vec::new(),
        })
        .unwrap();
        assert_eq!(args.get("BrowseNodeId").unwrap(), "3839,3952");
        assert_eq!(args.len(), 1);
    }
}
