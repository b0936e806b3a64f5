//! Migration v2: expression indexes for the hot lookups
//!
//! Counter lookup by term, trending order by count, and saved-movie lookup by
//! (owner, movie).

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_documents_search_term
    ON documents(collection, json_extract(fields, '$.search_term'));

CREATE INDEX IF NOT EXISTS idx_documents_count
    ON documents(collection, json_extract(fields, '$.count'));

CREATE INDEX IF NOT EXISTS idx_documents_owner_movie
    ON documents(collection, json_extract(fields, '$.owner_id'), json_extract(fields, '$.movie_id'));
";
