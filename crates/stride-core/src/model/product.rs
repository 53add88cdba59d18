//! Products, brands and reviews.

use indexmap::IndexSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  id::{BrandId, ProductId, ReviewId},
  registry::Entity,
  validate,
};

// ─── Product ─────────────────────────────────────────────────────────────────

/// Variant-specific part of a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
  Sneaker(Sneaker),
  Accessory(Accessory),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sneaker {
  /// Aggregation: the brand does not own the sneaker.
  pub(crate) brand: Option<BrandId>,
  collection:       String,
  size:             u32,
}

impl Sneaker {
  pub fn brand(&self) -> Option<BrandId> { self.brand }

  pub fn collection(&self) -> &str { &self.collection }

  pub fn size(&self) -> u32 { self.size }

  pub fn set_collection(&mut self, collection: &str) -> Result<()> {
    self.collection = validate::non_blank("collection", collection)?;
    Ok(())
  }

  pub fn set_size(&mut self, size: u32) -> Result<()> {
    self.size = validate::in_range("size", size, 1, u32::MAX)?;
    Ok(())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accessory {
  accessory_type:             String,
  pub(crate) compatibilities: IndexSet<ProductId>,
}

impl Accessory {
  pub fn accessory_type(&self) -> &str { &self.accessory_type }

  pub fn compatibilities(&self) -> impl Iterator<Item = ProductId> + '_ {
    self.compatibilities.iter().copied()
  }

  pub fn set_accessory_type(&mut self, accessory_type: &str) -> Result<()> {
    self.accessory_type = validate::non_blank("accessory_type", accessory_type)?;
    Ok(())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub(crate) id:      ProductId,
  name:               String,
  price:              Decimal,
  category:           String,
  available:          bool,
  color:              String,
  material:           String,
  /// Composition: reviews are deleted with the product.
  pub(crate) reviews: IndexSet<ReviewId>,
  pub(crate) kind:    ProductKind,
}

/// Fields shared by [`NewSneaker`] and [`NewAccessory`].
#[derive(Debug, Clone)]
struct Common<'a> {
  name:      &'a str,
  price:     Decimal,
  category:  &'a str,
  available: bool,
  color:     &'a str,
  material:  &'a str,
}

/// Input to [`crate::Shop::create_sneaker`].
#[derive(Debug, Clone)]
pub struct NewSneaker {
  pub name:       String,
  pub price:      Decimal,
  pub category:   String,
  pub available:  bool,
  pub color:      String,
  pub material:   String,
  pub collection: String,
  pub size:       u32,
}

/// Input to [`crate::Shop::create_accessory`].
#[derive(Debug, Clone)]
pub struct NewAccessory {
  pub name:           String,
  pub price:          Decimal,
  pub category:       String,
  pub available:      bool,
  pub color:          String,
  pub material:       String,
  pub accessory_type: String,
}

impl Product {
  fn build(common: Common<'_>, kind: ProductKind) -> Result<Self> {
    Ok(Self {
      id: ProductId::new(),
      name: validate::non_blank("name", common.name)?,
      price: validate::non_negative("price", common.price)?,
      category: validate::non_blank("category", common.category)?,
      available: common.available,
      color: validate::non_blank("color", common.color)?,
      material: validate::non_blank("material", common.material)?,
      reviews: IndexSet::new(),
      kind,
    })
  }

  pub(crate) fn sneaker(input: &NewSneaker) -> Result<Self> {
    let sneaker = Sneaker {
      brand:      None,
      collection: validate::non_blank("collection", &input.collection)?,
      size:       validate::in_range("size", input.size, 1, u32::MAX)?,
    };
    Self::build(
      Common {
        name:      &input.name,
        price:     input.price,
        category:  &input.category,
        available: input.available,
        color:     &input.color,
        material:  &input.material,
      },
      ProductKind::Sneaker(sneaker),
    )
  }

  pub(crate) fn accessory(input: &NewAccessory) -> Result<Self> {
    let accessory = Accessory {
      accessory_type:  validate::non_blank("accessory_type", &input.accessory_type)?,
      compatibilities: IndexSet::new(),
    };
    Self::build(
      Common {
        name:      &input.name,
        price:     input.price,
        category:  &input.category,
        available: input.available,
        color:     &input.color,
        material:  &input.material,
      },
      ProductKind::Accessory(accessory),
    )
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn price(&self) -> Decimal { self.price }

  pub fn category(&self) -> &str { &self.category }

  pub fn is_available(&self) -> bool { self.available }

  pub fn color(&self) -> &str { &self.color }

  pub fn material(&self) -> &str { &self.material }

  pub fn reviews(&self) -> impl Iterator<Item = ReviewId> + '_ {
    self.reviews.iter().copied()
  }

  pub fn kind(&self) -> &ProductKind { &self.kind }

  pub fn as_sneaker(&self) -> Option<&Sneaker> {
    match &self.kind {
      ProductKind::Sneaker(s) => Some(s),
      ProductKind::Accessory(_) => None,
    }
  }

  pub fn as_sneaker_mut(&mut self) -> Option<&mut Sneaker> {
    match &mut self.kind {
      ProductKind::Sneaker(s) => Some(s),
      ProductKind::Accessory(_) => None,
    }
  }

  pub fn as_accessory(&self) -> Option<&Accessory> {
    match &self.kind {
      ProductKind::Accessory(a) => Some(a),
      ProductKind::Sneaker(_) => None,
    }
  }

  pub fn as_accessory_mut(&mut self) -> Option<&mut Accessory> {
    match &mut self.kind {
      ProductKind::Accessory(a) => Some(a),
      ProductKind::Sneaker(_) => None,
    }
  }

  pub fn set_name(&mut self, name: &str) -> Result<()> {
    self.name = validate::non_blank("name", name)?;
    Ok(())
  }

  /// Orders already placed keep the price they captured.
  pub fn set_price(&mut self, price: Decimal) -> Result<()> {
    self.price = validate::non_negative("price", price)?;
    Ok(())
  }

  pub fn set_category(&mut self, category: &str) -> Result<()> {
    self.category = validate::non_blank("category", category)?;
    Ok(())
  }

  pub fn set_available(&mut self, available: bool) { self.available = available; }

  pub fn set_color(&mut self, color: &str) -> Result<()> {
    self.color = validate::non_blank("color", color)?;
    Ok(())
  }

  pub fn set_material(&mut self, material: &str) -> Result<()> {
    self.material = validate::non_blank("material", material)?;
    Ok(())
  }
}

impl Entity for Product {
  type Id = ProductId;

  fn id(&self) -> ProductId { self.id }
}

// ─── Brand ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
  pub(crate) id:       BrandId,
  name:                String,
  description:         String,
  country_of_origin:   String,
  pub(crate) sneakers: IndexSet<ProductId>,
}

/// Input to [`crate::Shop::create_brand`].
#[derive(Debug, Clone)]
pub struct NewBrand {
  pub name:              String,
  pub description:       String,
  pub country_of_origin: String,
}

impl NewBrand {
  pub fn named(name: &str) -> Self {
    Self {
      name:              name.to_owned(),
      description:       String::new(),
      country_of_origin: "Unknown".to_owned(),
    }
  }
}

impl Brand {
  pub(crate) fn build(input: &NewBrand) -> Result<Self> {
    Ok(Self {
      id: BrandId::new(),
      name: validate::non_blank("name", &input.name)?,
      description: input.description.clone(),
      country_of_origin: validate::non_blank("country_of_origin", &input.country_of_origin)?,
      sneakers: IndexSet::new(),
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn description(&self) -> &str { &self.description }

  pub fn country_of_origin(&self) -> &str { &self.country_of_origin }

  pub fn sneakers(&self) -> impl Iterator<Item = ProductId> + '_ {
    self.sneakers.iter().copied()
  }

  pub fn has_sneaker(&self, id: ProductId) -> bool { self.sneakers.contains(&id) }

  pub fn set_description(&mut self, description: &str) { self.description = description.to_owned(); }
}

impl Entity for Brand {
  type Id = BrandId;

  fn id(&self) -> BrandId { self.id }
}

// ─── Review ──────────────────────────────────────────────────────────────────

pub const MAX_HEADER_CHARS: usize = 100;
pub const MAX_COMMENT_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
  pub(crate) id:      ReviewId,
  pub(crate) product: ProductId,
  rating:             u8,
  header:             String,
  comment:            String,
}

/// Input to [`crate::Shop::create_review`].
#[derive(Debug, Clone)]
pub struct NewReview {
  pub rating:  u8,
  pub header:  String,
  pub comment: String,
}

impl Review {
  pub(crate) fn build(product: ProductId, input: &NewReview) -> Result<Self> {
    validate::max_chars("header", &input.header, MAX_HEADER_CHARS)?;
    validate::max_chars("comment", &input.comment, MAX_COMMENT_CHARS)?;
    Ok(Self {
      id: ReviewId::new(),
      product,
      rating: validate::in_range("rating", input.rating, 1, 5)?,
      header: input.header.clone(),
      comment: input.comment.clone(),
    })
  }

  pub fn product(&self) -> ProductId { self.product }

  pub fn rating(&self) -> u8 { self.rating }

  pub fn header(&self) -> &str { &self.header }

  pub fn comment(&self) -> &str { &self.comment }
}

impl Entity for Review {
  type Id = ReviewId;

  fn id(&self) -> ReviewId { self.id }
}
