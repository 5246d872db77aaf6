//! Share tokens: a movie match packed into a URL-safe string so a result can
//! be reopened from a link without asking the backend again.
//!
//! Tokens are the movie JSON compressed with lz-string's URI-component
//! encoding, so links made by the web front-end decode here and vice versa.

use crate::models::MovieMatch;

/// Query parameter carrying the token in share links.
pub const SHARE_QUERY_PARAM: &str = "share";

pub fn encode_movie(movie: &MovieMatch) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(movie)?;
    Ok(lz_str::compress_to_encoded_uri_component(json.as_str()))
}

/// Decode a share token. Empty or malformed tokens yield `None`.
pub fn decode_movie(token: &str) -> Option<MovieMatch> {
    // Query decoding may have turned '+' into ' '.
    let token = token.replace(' ', "+");
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let Some(wide) = lz_str::decompress_from_encoded_uri_component(token) else {
        tracing::debug!("Share token does not decompress");
        return None;
    };

    let json = String::from_utf16(&wide)
        .map_err(|e| tracing::debug!(error = %e, "Share token is not valid UTF-16"))
        .ok()?;

    serde_json::from_str(&json)
        .map_err(|e| tracing::debug!(error = %e, "Share token does not hold a movie"))
        .ok()
}

/// `{base}/?share={token}`
pub fn share_url(base_url: &str, movie: &MovieMatch) -> Result<String, serde_json::Error> {
    let token = encode_movie(movie)?;
    Ok(format!(
        "{}/?{}={}",
        base_url.trim_end_matches('/'),
        SHARE_QUERY_PARAM,
        token
    ))
}

/// Web search link shown under a result.
pub fn search_url(title: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(&format!("{} movie watch now", title))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Produced by lz-string's compressToEncodedURIComponent on the
    // front-end's JSON.stringify output.
    const INCEPTION_TOKEN: &str = "N4IgDg9gzgLgpgJwPoFcEBsQC4QAsYxhRYD0JAlgLYCGA5nAHQyUAmARgxArSTCWCQDuAVgAMoigDsAxnDAxyESQwBWYWiAA0IBTHRxsIAJIy5CpVpAI4+6lDhIW1eIYBMogIyiAtKIDs3h4AbJYQAG6IYeRwgoYAggAEMLjRAGYJgrgQCbBw1OhQCdJckAjOcDlw0tYwhckIECi0uAks1tSU3lC41AjkkrRJVbiSEOgQtACeDJZhEPBI1BFl9NgAHAwALAC+QA";
    const AMELIE_TOKEN: &str = "N4IgDg9gzgLgpgJwPoFcEBsQC4QgDQgwCWM6c2IAggLYCX6R5BCcZAhlHEgCZvwUAmAAxCAjPhAQAboimMA7hQAycAAQAzNgCMUZFAA9V3OLCIA7IwHIa9RqoAKEXW3MSpEeEjYyEbAObkWADsAHQAnAC+QA";

    fn inception() -> MovieMatch {
        MovieMatch {
            poster_url: "https://image.tmdb.org/t/p/w500/inception.jpg".to_string(),
            title: "Inception".to_string(),
            release_date: "2010-07-16".to_string(),
            overview: "A thief who steals corporate secrets through dream-sharing technology."
                .to_string(),
            vote_average: Some(8.4),
        }
    }

    fn amelie() -> MovieMatch {
        MovieMatch {
            poster_url: String::new(),
            title: "Amélie".to_string(),
            release_date: "2001".to_string(),
            overview: "Le fabuleux destin d'Amélie Poulain".to_string(),
            vote_average: Some(7.9),
        }
    }

    #[test]
    fn test_decodes_front_end_tokens() {
        assert_eq!(decode_movie(INCEPTION_TOKEN), Some(inception()));
        assert_eq!(decode_movie(AMELIE_TOKEN), Some(amelie()));
    }

    #[test]
    fn test_encodes_like_front_end() {
        assert_eq!(encode_movie(&inception()).unwrap(), INCEPTION_TOKEN);
        assert_eq!(encode_movie(&amelie()).unwrap(), AMELIE_TOKEN);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode_movie(&amelie()).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '$')));
        assert_eq!(decode_movie(&token), Some(amelie()));
    }

    #[test]
    fn test_plus_turned_into_space() {
        assert!(INCEPTION_TOKEN.contains('+'));
        let mangled = INCEPTION_TOKEN.replace('+', " ");
        assert_eq!(decode_movie(&mangled), Some(inception()));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_movie(""), None);
        assert_eq!(decode_movie("   "), None);
        assert_eq!(decode_movie("!!not-a-token!!"), None);
        // valid token, not a movie
        assert_eq!(
            decode_movie(&lz_str::compress_to_encoded_uri_component("[1,2,3]")),
            None
        );
    }

    #[test]
    fn test_share_url() {
        let url = share_url("https://moviename.app/", &inception()).unwrap();
        assert_eq!(url, format!("https://moviename.app/?share={}", INCEPTION_TOKEN));
    }

    #[test]
    fn test_search_url_encodes_title() {
        assert_eq!(
            search_url("The Matrix"),
            "https://www.google.com/search?q=The%20Matrix%20movie%20watch%20now"
        );
    }
}
