use super::Product;

/// Stateless operations over sets of products.
pub struct ProductService;

impl ProductService {
    /// Raises every price by `percentage` percent, truncated to whole cents.
    pub fn increase_price(products: &mut [Product], percentage: i64) {
        for product in products.iter_mut() {
            let price = product.price();
            product.change_price(price + price.percent(percentage));
        }
    }
}
