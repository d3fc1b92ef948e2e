//! Hypermedia assembly for rating responses.

use tours_types::{
    CollectionLinks, EmbeddedRatings, Link, Rating, RatingCollection, RatingDto, RatingLinks,
};

/// Turns stored ratings into their linked wire representation.
#[derive(Debug, Clone)]
pub struct RatingAssembler {
    base_url: String,
}

impl RatingAssembler {
    /// `base_url` is the externally visible root of the API.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Single rating with `self` and `tour` links.
    pub fn to_model(&self, rating: Rating) -> RatingDto {
        RatingDto {
            links: RatingLinks {
                self_link: Link::new(format!("{}/ratings/{}", self.base_url, rating.id)),
                tour: Link::new(format!("{}/tours/{}", self.base_url, rating.tour_id)),
            },
            score: rating.score,
            comment: rating.comment,
            customer_id: rating.customer_id,
        }
    }

    /// Collection of ratings; `path` is the collection's own path, e.g. `/ratings`.
    pub fn to_collection(&self, ratings: Vec<Rating>, path: &str) -> RatingCollection {
        let ratings = ratings.into_iter().map(|r| self.to_model(r)).collect();

        RatingCollection {
            embedded: EmbeddedRatings { ratings },
            links: CollectionLinks {
                self_link: Link::new(format!("{}{}", self.base_url, path)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tours_types::{CustomerId, RatingId, TourId};

    fn rating(id: i64, tour: i64, customer: i64) -> Rating {
        Rating::from_parts(
            RatingId(id),
            TourId(tour),
            CustomerId(customer),
            4,
            Some("Nice".into()),
        )
    }

    #[test]
    fn test_to_model_links() {
        let assembler = RatingAssembler::new("http://localhost:3000/");

        let dto = assembler.to_model(rating(7, 2, 99));

        assert_eq!(dto.links.self_link.href, "http://localhost:3000/ratings/7");
        assert_eq!(dto.links.tour.href, "http://localhost:3000/tours/2");
        assert_eq!(dto.customer_id, CustomerId(99));
        assert_eq!(dto.score, 4);
        assert_eq!(dto.comment.as_deref(), Some("Nice"));
    }

    #[test]
    fn test_wire_shape() {
        let assembler = RatingAssembler::new("http://api.example.com");

        let json = serde_json::to_value(assembler.to_model(rating(1, 3, 5))).unwrap();

        assert_eq!(json["_links"]["self"]["href"], "http://api.example.com/ratings/1");
        assert_eq!(json["_links"]["tour"]["href"], "http://api.example.com/tours/3");
        assert_eq!(json["customer_id"], 5);
    }

    #[test]
    fn test_to_collection() {
        let assembler = RatingAssembler::new("http://localhost:3000");

        let collection =
            assembler.to_collection(vec![rating(1, 3, 5), rating(2, 3, 6)], "/tours/3/ratings");

        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.links.self_link.href,
            "http://localhost:3000/tours/3/ratings"
        );
        assert_eq!(
            collection.embedded.ratings[1].links.self_link.href,
            "http://localhost:3000/ratings/2"
        );
    }

    #[test]
    fn test_empty_collection() {
        let assembler = RatingAssembler::new("http://localhost:3000");

        let collection = assembler.to_collection(Vec::new(), "/ratings");

        assert!(collection.is_empty());
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["_embedded"]["ratings"], serde_json::json!([]));
    }
}
