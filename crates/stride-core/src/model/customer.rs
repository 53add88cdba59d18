use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  id::{CustomerId, OrderId, ProductId},
  registry::Entity,
  validate,
};

/// A shopper. The username is the key of the customer–order qualified
/// association; a customer without one cannot place orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
  pub(crate) id:            CustomerId,
  pub(crate) username:      Option<String>,
  name:                     String,
  email:                    String,
  phone_number:             Option<String>,
  pub(crate) cart:          Vec<ProductId>,
  pub(crate) wishlist:      IndexSet<ProductId>,
  pub(crate) order_history: IndexSet<OrderId>,
}

/// Input to [`crate::Shop::create_customer`].
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
  pub username:     Option<String>,
  pub name:         String,
  pub email:        String,
  pub phone_number: Option<String>,
}

impl NewCustomer {
  pub fn new(username: &str, name: &str, email: &str) -> Self {
    Self {
      username:     Some(username.to_owned()),
      name:         name.to_owned(),
      email:        email.to_owned(),
      phone_number: None,
    }
  }
}

impl Customer {
  pub(crate) fn build(input: NewCustomer) -> Result<Self> {
    let username = input
      .username
      .as_deref()
      .map(|u| validate::non_blank("username", u))
      .transpose()?;
    let phone_number = input
      .phone_number
      .as_deref()
      .map(|p| validate::non_blank("phone_number", p))
      .transpose()?;

    Ok(Self {
      id: CustomerId::new(),
      username,
      name: validate::non_blank("name", &input.name)?,
      email: validate::non_blank("email", &input.email)?,
      phone_number,
      cart: Vec::new(),
      wishlist: IndexSet::new(),
      order_history: IndexSet::new(),
    })
  }

  pub fn username(&self) -> Option<&str> { self.username.as_deref() }

  pub fn name(&self) -> &str { &self.name }

  pub fn email(&self) -> &str { &self.email }

  pub fn phone_number(&self) -> Option<&str> { self.phone_number.as_deref() }

  pub fn cart(&self) -> &[ProductId] { &self.cart }

  pub fn wishlist(&self) -> impl Iterator<Item = ProductId> + '_ {
    self.wishlist.iter().copied()
  }

  pub fn order_history(&self) -> impl Iterator<Item = OrderId> + '_ {
    self.order_history.iter().copied()
  }

  pub fn set_name(&mut self, name: &str) -> Result<()> {
    self.name = validate::non_blank("name", name)?;
    Ok(())
  }

  pub fn set_email(&mut self, email: &str) -> Result<()> {
    self.email = validate::non_blank("email", email)?;
    Ok(())
  }

  pub fn set_phone_number(&mut self, phone_number: Option<&str>) -> Result<()> {
    self.phone_number = phone_number
      .map(|p| validate::non_blank("phone_number", p))
      .transpose()?;
    Ok(())
  }
}

impl Entity for Customer {
  type Id = CustomerId;

  fn id(&self) -> CustomerId { self.id }
}
