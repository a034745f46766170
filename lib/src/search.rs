//! The fileset file search.

use super::*;
use crate::{
    client::{fetch, ApiRequest},
    entities::SearchPage,
};

/// Run a cursor paginated request to completion.
///
/// The request is repeated with the cursor from the previous page until the appliance says
/// there are no more pages. Pages are returned in the order they were fetched.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `request` is the initial request.
pub fn paginate(api: &dyn ApplianceApi, request: &ApiRequest) -> Result<Vec<SearchPage>> {
    let mut pages = vec![];
    let mut next = request.clone();
    loop {
        let page: SearchPage = fetch(api, &next)?;
        let cursor = match page.has_more {
            true => match &page.next_cursor {
                Some(cursor) => Some(cursor.clone()),
                None => return Err(Error::Failed(format!("{next}: more pages are available without a cursor"))),
            },
            false => None,
        };
        log::debug!("page {} has {} files", pages.len() + 1, page.data.len());
        pages.push(page);
        match cursor {
            Some(cursor) => next = request.clone().query("cursor", &cursor),
            None => break,
        }
    }
    Ok(pages)
}

/// Search a fileset for files.
///
/// The search request has no timeout, large filesets can take a while.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `fileset_id` identifies the fileset.
/// * `pattern` is the file name query.
pub fn search_fileset(api: &dyn ApplianceApi, fileset_id: &str, pattern: &str) -> Result<Vec<SearchPage>> {
    let request = ApiRequest::internal("/search").query("managed_id", fileset_id).query("query_string", pattern);
    paginate(api, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    const SEARCH: &str = "/internal/search?managed_id=fs-1&query_string=*.txt";

    fn page(path: &str, cursor: Option<&str>) -> Value {
        json!({
            "hasMore": cursor.is_some(),
            "nextCursor": cursor,
            "data": [{"path": path, "fileVersions": []}]
        })
    }

    #[test]
    fn pages() {
        let api = MockApi::default()
            .with(SEARCH, page("/a", Some("c1")))
            .with(&format!("{SEARCH}&cursor=c1"), page("/b", Some("c2")))
            .with(&format!("{SEARCH}&cursor=c2"), page("/c", None));
        let pages = search_fileset(&api, "fs-1", "*.txt").unwrap();
        let paths: Vec<&str> = pages.iter().map(|page| page.data[0].path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b", "/c"]);
        let requests: Vec<String> = api.requests().iter().map(|request| request.to_string()).collect();
        assert_eq!(
            requests,
            vec![SEARCH.to_string(), format!("{SEARCH}&cursor=c1"), format!("{SEARCH}&cursor=c2")]
        );
        assert!(api.requests().iter().all(|request| request.timeout.is_none()));
    }

    #[test]
    fn single_page() {
        let api = MockApi::default().with(SEARCH, page("/a", None));
        let pages = search_fileset(&api, "fs-1", "*.txt").unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(api.calls(SEARCH), 1);
    }

    #[test]
    fn many_pages() {
        const PAGES: usize = 25;
        let mut api = MockApi::default().with(SEARCH, page("/0", Some("c1")));
        for index in 1..PAGES {
            let cursor = format!("c{}", index + 1);
            let next = match index + 1 < PAGES {
                true => Some(cursor.as_str()),
                false => None,
            };
            api = api.with(&format!("{SEARCH}&cursor=c{index}"), page(&format!("/{index}"), next));
        }
        let pages = search_fileset(&api, "fs-1", "*.txt").unwrap();
        assert_eq!(pages.len(), PAGES);
        for (index, page) in pages.iter().enumerate() {
            assert_eq!(page.data[0].path, format!("/{index}"));
        }
    }

    #[test]
    fn missing_cursor() {
        let api = MockApi::default().with(SEARCH, json!({"hasMore": true, "data": []}));
        assert!(search_fileset(&api, "fs-1", "*.txt").is_err());
    }
}
