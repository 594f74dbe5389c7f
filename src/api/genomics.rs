use async_trait::async_trait;

use super::{types::*, ApiClient, ApiError};

/// The four searches needed to look a sample up at a single position.
#[async_trait]
pub trait GenomicsApi {
    async fn search_read_group_sets(
        &mut self,
        request: &SearchReadGroupSetsRequest,
    ) -> Result<SearchReadGroupSetsResponse, ApiError>;

    async fn search_reads(
        &mut self,
        request: &SearchReadsRequest,
    ) -> Result<SearchReadsResponse, ApiError>;

    async fn search_call_sets(
        &mut self,
        request: &SearchCallSetsRequest,
    ) -> Result<SearchCallSetsResponse, ApiError>;

    async fn search_variants(
        &mut self,
        request: &SearchVariantsRequest,
    ) -> Result<SearchVariantsResponse, ApiError>;
}

// Each search only asks for the fields we go on to use.
const READ_GROUP_SET_FIELDS: &str = "readGroupSets(id)";
const READ_FIELDS: &str = "alignments(alignment,alignedSequence)";
const CALL_SET_FIELDS: &str = "callSets(id)";
const VARIANT_FIELDS: &str = "variants(names,referenceBases,alternateBases,calls(genotype))";

#[async_trait]
impl GenomicsApi for ApiClient {
    async fn search_read_group_sets(
        &mut self,
        request: &SearchReadGroupSetsRequest,
    ) -> Result<SearchReadGroupSetsResponse, ApiError> {
        self.search("readgroupsets", READ_GROUP_SET_FIELDS, request)
            .await
    }

    async fn search_reads(
        &mut self,
        request: &SearchReadsRequest,
    ) -> Result<SearchReadsResponse, ApiError> {
        self.search("reads", READ_FIELDS, request).await
    }

    async fn search_call_sets(
        &mut self,
        request: &SearchCallSetsRequest,
    ) -> Result<SearchCallSetsResponse, ApiError> {
        self.search("callsets", CALL_SET_FIELDS, request).await
    }

    async fn search_variants(
        &mut self,
        request: &SearchVariantsRequest,
    ) -> Result<SearchVariantsResponse, ApiError> {
        self.search("variants", VARIANT_FIELDS, request).await
    }
}
