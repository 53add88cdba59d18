//! Products, brands and reviews.

use crate::{
  Error, Result, Violation,
  id::{BrandId, Identifier, ProductId, ReviewId},
  link::{self, Linked, ReviewProduct, SneakerBrand},
  model::{Brand, NewAccessory, NewBrand, NewReview, NewSneaker, Product, Review},
};

use super::Shop;

impl Shop {
  pub fn create_sneaker(&mut self, input: &NewSneaker) -> Result<ProductId> {
    let product = Product::sneaker(input)?;
    let id = product.id;
    self.products.add(product);
    tracing::debug!(product = %id, "sneaker created");
    Ok(id)
  }

  pub fn create_accessory(&mut self, input: &NewAccessory) -> Result<ProductId> {
    let product = Product::accessory(input)?;
    let id = product.id;
    self.products.add(product);
    tracing::debug!(product = %id, "accessory created");
    Ok(id)
  }

  pub fn create_brand(&mut self, input: &NewBrand) -> Result<BrandId> {
    let brand = Brand::build(input)?;
    let id = brand.id;
    self.brands.add(brand);
    Ok(id)
  }

  // ── Sneaker ↔ Brand ───────────────────────────────────────────────────

  /// Put a sneaker under `brand`, moving it out of its previous brand.
  pub fn assign_brand(&mut self, sneaker: ProductId, brand: BrandId) -> Result<Linked<BrandId>> {
    link::link::<SneakerBrand>(&mut self.products, &mut self.brands, sneaker, brand)
  }

  /// Returns the brand the sneaker was taken out of, if any.
  pub fn remove_brand(&mut self, sneaker: ProductId) -> Result<Option<BrandId>> {
    link::unlink::<SneakerBrand>(&mut self.products, &mut self.brands, sneaker)
  }

  // ── Accessory compatibility ───────────────────────────────────────────

  /// Mark `accessory` as usable with `product`. Returns `false` if it was
  /// already marked.
  pub fn add_compatibility(&mut self, accessory: ProductId, product: ProductId) -> Result<bool> {
    self.products.require(product)?;
    if accessory == product {
      return Err(Error::invalid("product", "an accessory cannot be compatible with itself"));
    }
    let Some(a) = self.products.require_mut(accessory)?.as_accessory_mut() else {
      return Err(
        Violation::RoleMismatch { role: "accessory_compatibility", id: accessory.as_uuid() }.into(),
      );
    };
    Ok(a.compatibilities.insert(product))
  }

  pub fn remove_compatibility(&mut self, accessory: ProductId, product: ProductId) -> Result<()> {
    let removed = self
      .products
      .require_mut(accessory)?
      .as_accessory_mut()
      .is_some_and(|a| a.compatibilities.shift_remove(&product));
    if !removed {
      return Err(Error::not_associated(accessory, product));
    }
    Ok(())
  }

  // ── Reviews ───────────────────────────────────────────────────────────

  pub fn create_review(&mut self, product: ProductId, input: &NewReview) -> Result<ReviewId> {
    if !self.products.contains(product) {
      return Err(link::missing_owner(product));
    }
    let review = Review::build(product, input)?;
    let id = review.id;
    self.reviews.add(review);
    link::attach::<ReviewProduct>(&self.reviews, &mut self.products, id)?;
    tracing::debug!(review = %id, %product, "review added");
    Ok(id)
  }

  /// Mean rating over the product's reviews, or `None` if it has none.
  pub fn product_rating(&self, product: ProductId) -> Result<Option<f64>> {
    let ratings: Vec<u8> = self
      .products
      .require(product)?
      .reviews()
      .filter_map(|r| self.reviews.get(r))
      .map(Review::rating)
      .collect();
    if ratings.is_empty() {
      return Ok(None);
    }
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    Ok(Some(f64::from(sum) / ratings.len() as f64))
  }
}
